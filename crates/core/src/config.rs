//! Process configuration for the archive client
//!
//! Built once at startup and handed to [`crate::LichessClient::from_config`].

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://lichess.org/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const TOKEN_VAR: &str = "LICHESS_API_TOKEN";
const BASE_URL_VAR: &str = "LICHESS_API_BASE";
const TIMEOUT_VAR: &str = "LICHESS_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_token: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `LICHESS_API_TOKEN`, `LICHESS_API_BASE` and `LICHESS_TIMEOUT_SECS`.
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(token) = lookup(TOKEN_VAR).filter(|t| !t.trim().is_empty()) {
            config.api_token = Some(token.trim().to_string());
        }
        if let Some(base) = lookup(BASE_URL_VAR).filter(|b| !b.trim().is_empty()) {
            config.base_url = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_VAR, raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
