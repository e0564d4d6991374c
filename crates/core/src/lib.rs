//! Chess Corpus Core Library
//!
//! Pulls rating-filtered game corpora from Lichess and converts between
//! win probability and centipawn evaluations.

pub mod config;
pub mod corpus;
pub mod decompress;
pub mod error;
pub mod eval;
pub mod lichess;

pub use config::Config;
pub use corpus::{get_games, ArchiveService, CorpusQuery, RatingBand};
pub use error::{Error, Result};
pub use eval::{centipawns_to_win_probability, win_probability_to_centipawns, EvaluationValue};
pub use lichess::{LichessClient, LichessGame, PerfType};
