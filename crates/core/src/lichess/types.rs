//! Lichess API data types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Query parameters for the game export endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameExportParams {
    pub max: Option<u32>,
    pub perf_type: Option<PerfType>,
    pub rated: Option<bool>,
    pub with_evals: bool,
    pub since: Option<i64>,  // Unix timestamp in milliseconds
    pub until: Option<i64>,  // Unix timestamp in milliseconds
}

impl GameExportParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    pub fn perf_type(mut self, perf_type: PerfType) -> Self {
        self.perf_type = Some(perf_type);
        self
    }

    pub fn rated(mut self, rated: bool) -> Self {
        self.rated = Some(rated);
        self
    }

    pub fn with_evals(mut self) -> Self {
        self.with_evals = true;
        self
    }

    pub fn since(mut self, timestamp: i64) -> Self {
        self.since = Some(timestamp);
        self
    }

    pub fn until(mut self, timestamp: i64) -> Self {
        self.until = Some(timestamp);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerfType {
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    Classical,
    Correspondence,
}

impl PerfType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerfType::UltraBullet => "ultraBullet",
            PerfType::Bullet => "bullet",
            PerfType::Blitz => "blitz",
            PerfType::Rapid => "rapid",
            PerfType::Classical => "classical",
            PerfType::Correspondence => "correspondence",
        }
    }
}

impl fmt::Display for PerfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerfType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ultrabullet" => Ok(PerfType::UltraBullet),
            "bullet" => Ok(PerfType::Bullet),
            "blitz" => Ok(PerfType::Blitz),
            "rapid" => Ok(PerfType::Rapid),
            "classical" => Ok(PerfType::Classical),
            "correspondence" => Ok(PerfType::Correspondence),
            _ => Err(Error::UnknownPerfType(s.to_string())),
        }
    }
}

/// One finished game as exported by Lichess
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LichessGame {
    pub id: String,
    pub rated: bool,
    pub variant: String,
    pub speed: String,
    pub perf: String,
    pub created_at: i64,
    pub last_move_at: i64,
    pub status: String,
    pub players: Players,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening: Option<Opening>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<Clock>,
    /// Per-ply engine analysis, present when the game was analysed and
    /// `evals` was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Vec<MoveEval>>,
}

impl LichessGame {
    pub fn result(&self) -> &str {
        match self.winner.as_deref() {
            Some("white") => "1-0",
            Some("black") => "0-1",
            None if self.status == "draw" || self.status == "stalemate" => "1/2-1/2",
            _ => "*",
        }
    }

    pub fn white_username(&self) -> &str {
        self.players.white.username()
    }

    pub fn black_username(&self) -> &str {
        self.players.black.username()
    }

    pub fn white_rating(&self) -> Option<u16> {
        self.players.white.rating
    }

    pub fn black_rating(&self) -> Option<u16> {
        self.players.black.rating
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ({}) vs {} ({}) [{}] {}",
            self.white_username(),
            rating_label(self.white_rating()),
            self.black_username(),
            rating_label(self.black_rating()),
            self.result(),
            self.speed,
        )
    }
}

fn rating_label(rating: Option<u16>) -> String {
    rating.map(|r| r.to_string()).unwrap_or_else(|| "?".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Players {
    pub white: Player,
    pub black: Player,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_diff: Option<i16>,
    /// AI opponents carry a level instead of a user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_level: Option<u8>,
}

impl Player {
    pub fn username(&self) -> &str {
        self.user.as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("Anonymous")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opening {
    pub eco: String,
    pub name: String,
    pub ply: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clock {
    pub initial: u32,
    pub increment: u32,
    pub total_time: u32,
}

/// Engine evaluation of one ply, from the side of white
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judgment: Option<Judgment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgment {
    pub name: String,
    pub comment: String,
}
