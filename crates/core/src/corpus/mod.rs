//! Rating-filtered game corpus extraction

mod band;
mod fetcher;

pub use band::RatingBand;
pub use fetcher::{get_games, get_games_at, trailing_month, ArchiveService, CorpusQuery};
