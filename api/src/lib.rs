pub mod balldontlie;
pub mod client;
pub mod schedule;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types: the shape of games.json, independent of the API wire format
// ---------------------------------------------------------------------------

/// One team's home schedule for a season, as written by `fetch-games`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub team_id: u64,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub season: i32,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    /// Sorted ascending by tip-off.
    #[serde(default)]
    pub home_games: Vec<Game>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: u64,
    #[serde(
        serialize_with = "serialize_calendar_day",
        deserialize_with = "deserialize_calendar_day"
    )]
    pub date: NaiveDate,
    /// Precise tip-off when the API knows it. `None` until the league sets a time.
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    pub opponent: String,
    pub opponent_abbr: String,
    pub home_team: String,
    pub season: i32,
    #[serde(default)]
    pub status: String,
}

impl Game {
    /// Effective start of the game: the explicit instant, or midnight UTC of `date`.
    pub fn tip_off(&self) -> DateTime<Utc> {
        self.datetime
            .unwrap_or_else(|| self.date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Last word of `home_team`: "Clippers" for "Los Angeles Clippers".
    ///
    /// Multi-word nicknames are cut short ("Portland Trail Blazers" gives
    /// "Blazers").
    pub fn home_nickname(&self) -> &str {
        self.home_team
            .rsplit(' ')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.home_team)
    }
}

/// Why a schedule could not produce a next game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Unreadable source, non-success response or malformed body.
    LoadFailure(String),
    /// Loaded fine, but no game tips off at or after now.
    EmptySchedule,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::LoadFailure(msg) => write!(f, "Failed to load schedule: {msg}"),
            ScheduleError::EmptySchedule => write!(f, "No upcoming home games"),
        }
    }
}

impl std::error::Error for ScheduleError {}

fn serialize_calendar_day<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date.format("%Y-%m-%d").to_string())
}

/// Accepts "2025-10-21" as well as a full timestamp such as "2025-10-21T00:00:00.000Z".
fn deserialize_calendar_day<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(d)?;
    parse_calendar_day(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_calendar_day(raw: &str) -> Result<NaiveDate, String> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| format!("invalid date {raw:?}: {e}"))
}
