//! Lichess API client for exporting games

use reqwest::{Client, Url};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::{debug, warn};

use super::types::*;
use crate::config::Config;
use crate::corpus::ArchiveService;
use crate::error::{Error, Result};

pub struct LichessClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl LichessClient {
    /// Anonymous client against the public API with default settings
    pub fn new() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", config.base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            token: config.api_token.clone(),
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/x-ndjson"));

        if let Some(ref token) = self.token {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        headers
    }

    /// `{base}/games/user/{username}`, with the username as one encoded segment
    fn export_url(&self, username: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base URL cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["games", "user", username]);
        Ok(url)
    }

    /// Export up to `params.max` games played by `username`, newest first
    pub async fn export_by_player(&self, username: &str, params: &GameExportParams) -> Result<Vec<LichessGame>> {
        let url = self.export_url(username)?;
        let query = export_query(params);
        debug!(%username, ?query, "exporting games");

        let response = self.client
            .get(url)
            .headers(self.headers())
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Lichess(format!(
                "API error: {} - {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let text = response.text().await?;
        parse_ndjson_games(&text)
    }
}

impl ArchiveService for LichessClient {
    async fn export_by_player(&self, username: &str, params: &GameExportParams) -> Result<Vec<LichessGame>> {
        LichessClient::export_by_player(self, username, params).await
    }
}

fn export_query(params: &GameExportParams) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("pgnInJson", "true".to_string()),
        ("opening", "true".to_string()),
        ("moves", "true".to_string()),
    ];

    if let Some(max) = params.max {
        query.push(("max", max.to_string()));
    }
    if let Some(perf_type) = params.perf_type {
        query.push(("perfType", perf_type.as_str().to_string()));
    }
    if let Some(rated) = params.rated {
        query.push(("rated", rated.to_string()));
    }
    if params.with_evals {
        query.push(("evals", "true".to_string()));
    }
    if let Some(since) = params.since {
        query.push(("since", since.to_string()));
    }
    if let Some(until) = params.until {
        query.push(("until", until.to_string()));
    }

    query
}

fn parse_ndjson_games(text: &str) -> Result<Vec<LichessGame>> {
    let mut games = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<LichessGame>(line) {
            Ok(game) => games.push(game),
            Err(e) => {
                warn!("skipping unparseable game line: {}", e);
                continue;
            }
        }
    }

    Ok(games)
}
