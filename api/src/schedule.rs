use crate::{Game, Schedule, ScheduleError};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCHEDULE_PATH: &str = "data/games.json";

/// Where `games.json` is read from: a local file or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSource {
    File(PathBuf),
    Url(String),
}

impl Default for ScheduleSource {
    fn default() -> Self {
        ScheduleSource::File(PathBuf::from(DEFAULT_SCHEDULE_PATH))
    }
}

impl ScheduleSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            ScheduleSource::Url(raw.to_owned())
        } else {
            ScheduleSource::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleSource::File(path) => write!(f, "{}", path.display()),
            ScheduleSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Reads the schedule fresh on every call. No caching, no retries.
#[derive(Debug, Clone)]
pub struct ScheduleLoader {
    client: Client,
    source: ScheduleSource,
    timeout: Duration,
}

impl ScheduleLoader {
    pub fn new(source: ScheduleSource) -> Self {
        Self {
            client: Client::builder()
                .user_agent("tipoff/0.1 (home game countdown)")
                .build()
                .unwrap_or_default(),
            source,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn source(&self) -> &ScheduleSource {
        &self.source
    }

    pub async fn load(&self) -> Result<Schedule, ScheduleError> {
        match &self.source {
            ScheduleSource::File(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    ScheduleError::LoadFailure(format!("could not read {}: {e}", path.display()))
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    ScheduleError::LoadFailure(format!("invalid schedule json at {}: {e}", path.display()))
                })
            }
            ScheduleSource::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .header(reqwest::header::CACHE_CONTROL, "no-cache")
                    .timeout(self.timeout)
                    .send()
                    .await
                    .map_err(|e| ScheduleError::LoadFailure(format!("{url}: {e}")))?;
                response
                    .error_for_status()
                    .map_err(|e| ScheduleError::LoadFailure(format!("{url}: {e}")))?
                    .json::<Schedule>()
                    .await
                    .map_err(|e| ScheduleError::LoadFailure(format!("{url}: invalid schedule json: {e}")))
            }
        }
    }

    /// Load, then reduce to the games still ahead of `now`.
    pub async fn load_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Game>, ScheduleError> {
        let schedule = self.load().await?;
        next_games(&schedule, now)
    }
}

/// Games whose tip-off is at or after `now`, soonest first.
///
/// The file is written sorted, but the stable sort here keeps the first entry
/// the minimum even for a hand-edited file.
pub fn upcoming_games(schedule: &Schedule, now: DateTime<Utc>) -> Vec<Game> {
    let mut upcoming: Vec<Game> = schedule
        .home_games
        .iter()
        .filter(|g| g.tip_off() >= now)
        .cloned()
        .collect();
    upcoming.sort_by_key(Game::tip_off);
    upcoming
}

/// Like [`upcoming_games`], but an empty result is an [`ScheduleError::EmptySchedule`].
pub fn next_games(schedule: &Schedule, now: DateTime<Utc>) -> Result<Vec<Game>, ScheduleError> {
    let upcoming = upcoming_games(schedule, now);
    if upcoming.is_empty() {
        return Err(ScheduleError::EmptySchedule);
    }
    Ok(upcoming)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_calendar_day;
    use chrono::TimeZone;

    fn game(id: u64, datetime: &str) -> Game {
        let instant: DateTime<Utc> = datetime.parse().unwrap();
        Game {
            id,
            date: instant.date_naive(),
            datetime: Some(instant),
            opponent: format!("Opponent {id}"),
            opponent_abbr: "OPP".into(),
            home_team: "Los Angeles Clippers".into(),
            season: 2025,
            status: "Scheduled".into(),
        }
    }

    fn schedule(games: Vec<Game>) -> Schedule {
        Schedule {
            team_id: 13,
            team: "Los Angeles Clippers".into(),
            season: 2025,
            generated_at: None,
            home_games: games,
        }
    }

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tipoff-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn source_parse_distinguishes_urls_from_paths() {
        assert_eq!(
            ScheduleSource::parse("https://example.com/data/games.json"),
            ScheduleSource::Url("https://example.com/data/games.json".into())
        );
        assert_eq!(
            ScheduleSource::parse(" data/games.json "),
            ScheduleSource::File(PathBuf::from("data/games.json"))
        );
        assert_eq!(ScheduleSource::default().to_string(), DEFAULT_SCHEDULE_PATH);
    }

    #[test]
    fn past_games_are_filtered_out() {
        let now = Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap();
        let s = schedule(vec![
            game(1, "2025-10-25T02:00:00Z"),
            game(2, "2025-11-03T03:30:00Z"),
        ]);
        let upcoming = upcoming_games(&s, now);
        assert_eq!(upcoming.iter().map(|g| g.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn game_tipping_off_exactly_now_is_still_upcoming() {
        let now = Utc.with_ymd_and_hms(2025, 11, 3, 3, 30, 0).unwrap();
        let s = schedule(vec![game(2, "2025-11-03T03:30:00Z")]);
        assert_eq!(upcoming_games(&s, now).len(), 1);
    }

    #[test]
    fn soonest_future_game_comes_first_even_when_unsorted() {
        let now = Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap();
        let s = schedule(vec![
            game(3, "2025-12-01T03:30:00Z"),
            game(1, "2025-10-01T03:30:00Z"),
            game(2, "2025-11-05T03:30:00Z"),
        ]);
        let next = next_games(&s, now).unwrap();
        assert_eq!(next[0].id, 2);
        assert_eq!(next.iter().map(|g| g.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn date_only_games_use_midnight_utc() {
        let now = Utc.with_ymd_and_hms(2025, 11, 2, 12, 0, 0).unwrap();
        let mut today = game(1, "2025-11-02T00:00:00Z");
        today.datetime = None;
        today.date = parse_calendar_day("2025-11-02").unwrap();
        // Midnight UTC already passed at noon UTC.
        assert_eq!(next_games(&schedule(vec![today]), now), Err(ScheduleError::EmptySchedule));
    }

    #[test]
    fn nothing_ahead_is_empty_schedule() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let s = schedule(vec![game(1, "2025-10-25T02:00:00Z")]);
        assert_eq!(next_games(&s, now), Err(ScheduleError::EmptySchedule));
        assert_eq!(next_games(&schedule(vec![]), now), Err(ScheduleError::EmptySchedule));
    }

    #[tokio::test]
    async fn loads_schedule_from_file() {
        let s = schedule(vec![game(1, "2025-10-25T02:00:00Z")]);
        let path = temp_file("ok.json", &serde_json::to_string(&s).unwrap());

        let loaded = ScheduleLoader::new(ScheduleSource::File(path.clone())).load().await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, Ok(s));
    }

    #[tokio::test]
    async fn missing_file_is_a_load_failure() {
        let loader = ScheduleLoader::new(ScheduleSource::File(PathBuf::from(
            "/definitely/not/here/games.json",
        )));
        assert!(matches!(loader.load().await, Err(ScheduleError::LoadFailure(_))));
    }

    #[tokio::test]
    async fn malformed_file_is_a_load_failure() {
        let path = temp_file("bad.json", "{ not json");
        let loaded = ScheduleLoader::new(ScheduleSource::File(path.clone())).load().await;
        let _ = std::fs::remove_file(&path);
        assert!(matches!(loaded, Err(ScheduleError::LoadFailure(_))));
    }

    #[tokio::test]
    async fn loads_schedule_over_http() {
        let mut server = mockito::Server::new_async().await;
        let s = schedule(vec![game(7, "2025-11-03T03:30:00Z")]);
        let mock = server
            .mock("GET", "/data/games.json")
            .match_header("cache-control", "no-cache")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&s).unwrap())
            .create_async()
            .await;

        let loader = ScheduleLoader::new(ScheduleSource::Url(format!("{}/data/games.json", server.url())));
        let now = Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap();
        let upcoming = loader.load_upcoming(now).await.unwrap();

        assert_eq!(upcoming[0].id, 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_error_status_is_a_load_failure() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/data/games.json")
            .with_status(404)
            .create_async()
            .await;

        let loader = ScheduleLoader::new(ScheduleSource::Url(format!("{}/data/games.json", server.url())));
        assert!(matches!(loader.load().await, Err(ScheduleError::LoadFailure(_))));
    }
}
