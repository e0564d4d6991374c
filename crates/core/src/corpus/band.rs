//! Inclusive rating interval applied to both players of a game

use crate::lichess::{LichessGame, Player};

/// Closed interval `[from, to]` of player ratings.
///
/// An inverted band (`from > to`) is allowed and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBand {
    pub from: u16,
    pub to: u16,
}

impl RatingBand {
    pub fn new(from: u16, to: u16) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    pub fn contains(&self, rating: u16) -> bool {
        self.from <= rating && rating <= self.to
    }

    /// A player without a recorded rating counts as rated 0.
    pub fn contains_player(&self, player: &Player) -> bool {
        self.contains(player.rating.unwrap_or(0))
    }

    /// Both sides must fall inside the band.
    pub fn admits(&self, game: &LichessGame) -> bool {
        self.contains_player(&game.players.white) && self.contains_player(&game.players.black)
    }
}
