//! Zstandard decompression for Lichess database dumps
//!
//! Dumps are published as `lichess_db_standard_rated_YYYY-MM.pgn.zst`. The
//! whole file is decoded in one pass; an interrupted run can leave a
//! truncated output file behind.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;
use zstd::stream::read::Decoder as ZstdDecoder;

use crate::error::Result;

/// Decode `input` (a `.zst` dump) into `output`, returning the number of
/// bytes written.
pub fn decompress_zstd<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<u64> {
    let input = input.as_ref();
    let output = output.as_ref();
    info!(input = %input.display(), output = %output.display(), "decompressing archive");

    let reader = File::open(input)?;
    let mut writer = BufWriter::new(File::create(output)?);
    let written = decompress_stream(reader, &mut writer)?;
    writer.flush()?;

    info!(bytes = written, "decompression completed");
    Ok(written)
}

/// Stream a zstd frame sequence from `reader` into `writer`.
pub fn decompress_stream<R: Read, W: Write>(reader: R, writer: &mut W) -> Result<u64> {
    let mut decoder = ZstdDecoder::new(reader)?;
    let written = io::copy(&mut decoder, writer)?;
    Ok(written)
}
