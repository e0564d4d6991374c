//! Trailing-window export followed by a rating-band filter

use std::future::Future;

use chrono::{DateTime, Months, Utc};
use tracing::info;

use super::band::RatingBand;
use crate::error::Result;
use crate::lichess::{GameExportParams, LichessGame, PerfType};

/// The archive the corpus is drawn from.
///
/// Implementations own authentication, transport and timeouts. Errors are
/// passed through to the caller untouched.
pub trait ArchiveService {
    fn export_by_player(
        &self,
        username: &str,
        params: &GameExportParams,
    ) -> impl Future<Output = Result<Vec<LichessGame>>> + Send;
}

/// Everything needed to pull one player's games for a rating band
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusQuery {
    pub player: String,
    pub band: RatingBand,
    pub rated: bool,
    pub time_control: PerfType,
    /// Upper bound on games requested from the archive, before filtering
    pub num_games: u32,
}

impl CorpusQuery {
    fn export_params(&self, now: DateTime<Utc>) -> GameExportParams {
        let (since, until) = trailing_month(now);

        GameExportParams::new()
            .max(self.num_games)
            .perf_type(self.time_control)
            .rated(self.rated)
            .with_evals()
            .since(since.timestamp_millis())
            .until(until.timestamp_millis())
    }
}

/// One calendar month ending at `now`, as `(since, until)`.
pub fn trailing_month(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let since = now
        .checked_sub_months(Months::new(1))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    (since, now)
}

/// Query the archive once for the last month of `player`'s games and keep the
/// ones where both sides are rated inside `[from_rating, to_rating]`.
pub async fn get_games<A: ArchiveService>(
    archive: &A,
    from_rating: u16,
    to_rating: u16,
    player: &str,
    rated: bool,
    time_control: PerfType,
    num_games: u32,
) -> Result<Vec<LichessGame>> {
    let query = CorpusQuery {
        player: player.to_string(),
        band: RatingBand::new(from_rating, to_rating),
        rated,
        time_control,
        num_games,
    };
    get_games_at(archive, &query, Utc::now()).await
}

/// [`get_games`] with the end of the window fixed at `now`.
pub async fn get_games_at<A: ArchiveService>(
    archive: &A,
    query: &CorpusQuery,
    now: DateTime<Utc>,
) -> Result<Vec<LichessGame>> {
    let params = query.export_params(now);
    let exported = archive.export_by_player(&query.player, &params).await?;
    let exported_count = exported.len();

    let games: Vec<LichessGame> = exported
        .into_iter()
        .filter(|game| query.band.admits(game))
        .collect();

    info!(
        player = %query.player,
        perf = %query.time_control,
        from = query.band.from,
        to = query.band.to,
        exported = exported_count,
        kept = games.len(),
        "filtered corpus"
    );

    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::lichess::{Player, Players};
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct StubArchive {
        games: Vec<LichessGame>,
        calls: Mutex<Vec<(String, GameExportParams)>>,
    }

    impl StubArchive {
        fn new(games: Vec<LichessGame>) -> Self {
            Self { games, calls: Mutex::new(Vec::new()) }
        }
    }

    impl ArchiveService for StubArchive {
        async fn export_by_player(&self, username: &str, params: &GameExportParams) -> Result<Vec<LichessGame>> {
            self.calls.lock().unwrap().push((username.to_string(), params.clone()));
            Ok(self.games.clone())
        }
    }

    struct FailingArchive;

    impl ArchiveService for FailingArchive {
        async fn export_by_player(&self, _username: &str, _params: &GameExportParams) -> Result<Vec<LichessGame>> {
            Err(Error::Lichess("API error: 429 Too Many Requests".to_string()))
        }
    }

    fn game(id: &str, white: Option<u16>, black: Option<u16>) -> LichessGame {
        LichessGame {
            id: id.to_string(),
            rated: true,
            variant: "standard".to_string(),
            speed: "rapid".to_string(),
            perf: "rapid".to_string(),
            created_at: 0,
            last_move_at: 0,
            status: "resign".to_string(),
            players: Players {
                white: Player { rating: white, ..Player::default() },
                black: Player { rating: black, ..Player::default() },
            },
            winner: None,
            moves: None,
            pgn: None,
            opening: None,
            clock: None,
            analysis: None,
        }
    }

    fn query(from: u16, to: u16) -> CorpusQuery {
        CorpusQuery {
            player: "alice".to_string(),
            band: RatingBand::new(from, to),
            rated: true,
            time_control: PerfType::Rapid,
            num_games: 100,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_trailing_month_is_calendar_aware() {
        let (since, until) = trailing_month(fixed_now());
        assert_eq!(until, fixed_now());
        assert_eq!(since, Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_band_excludes_out_of_range_sides() {
        let archive = StubArchive::new(vec![
            game("low-white", Some(1250), Some(1350)),
            game("inside", Some(1300), Some(1400)),
            game("high-black", Some(1350), Some(1401)),
        ]);

        let games = get_games_at(&archive, &query(1300, 1400), fixed_now()).await.unwrap();
        let ids: Vec<&str> = games.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["inside"]);
    }

    #[tokio::test]
    async fn test_missing_rating_is_dropped() {
        let archive = StubArchive::new(vec![
            game("no-black", Some(1350), None),
            game("no-white", None, Some(1350)),
        ]);

        let games = get_games_at(&archive, &query(1300, 1400), fixed_now()).await.unwrap();
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn test_inverted_band_yields_nothing() {
        let archive = StubArchive::new(vec![game("a", Some(1350), Some(1350))]);

        let games = get_games_at(&archive, &query(1400, 1300), fixed_now()).await.unwrap();
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn test_archive_order_is_preserved() {
        let archive = StubArchive::new(vec![
            game("newest", Some(1310), Some(1320)),
            game("skipped", Some(900), Some(1320)),
            game("older", Some(1390), Some(1300)),
            game("oldest", Some(1400), Some(1400)),
        ]);

        let games = get_games_at(&archive, &query(1300, 1400), fixed_now()).await.unwrap();
        let ids: Vec<&str> = games.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "older", "oldest"]);
    }

    #[tokio::test]
    async fn test_single_query_with_window_and_filters() {
        let archive = StubArchive::new(Vec::new());
        let mut q = query(1300, 1400);
        q.rated = false;
        q.time_control = PerfType::Blitz;
        q.num_games = 25;

        let games = get_games_at(&archive, &q, fixed_now()).await.unwrap();
        assert!(games.is_empty());

        let calls = archive.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (username, params) = &calls[0];
        assert_eq!(username, "alice");
        assert_eq!(params.max, Some(25));
        assert_eq!(params.perf_type, Some(PerfType::Blitz));
        assert_eq!(params.rated, Some(false));
        assert_eq!(params.until, Some(fixed_now().timestamp_millis()));
        assert_eq!(
            params.since,
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap().timestamp_millis())
        );
    }

    #[tokio::test]
    async fn test_archive_error_is_propagated() {
        let result = get_games_at(&FailingArchive, &query(1300, 1400), fixed_now()).await;
        match result {
            Err(Error::Lichess(msg)) => assert!(msg.contains("429")),
            other => panic!("expected archive error, got {:?}", other.map(|g| g.len())),
        }
    }

    #[tokio::test]
    async fn test_get_games_uses_current_window() {
        let archive = StubArchive::new(vec![game("a", Some(1350), Some(1360))]);
        let before = Utc::now().timestamp_millis();

        let games = get_games(&archive, 1300, 1400, "alice", true, PerfType::Rapid, 10).await.unwrap();
        assert_eq!(games.len(), 1);

        let calls = archive.calls.lock().unwrap();
        let until = calls[0].1.until.unwrap();
        let since = calls[0].1.since.unwrap();
        assert!(until >= before);
        assert!(since < until);
        assert!(until - since >= 28 * 24 * 60 * 60 * 1000);
    }
}
