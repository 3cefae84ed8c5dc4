use crate::balldontlie::{BdlGame, BdlTeam, GamesResponse, TeamsResponse};
use crate::{Game, Schedule, parse_calendar_day};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const BALLDONTLIE_V1: &str = "https://api.balldontlie.io/v1";
const PER_PAGE: u32 = 100;
const TBD: &str = "TBD";

/// balldontlie v1 client. Every request carries the raw API key as `Authorization`.
#[derive(Debug, Clone)]
pub struct BallDontLieApi {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl BallDontLieApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, BALLDONTLIE_V1)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("tipoff/0.1 (home game countdown)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Look up a team by abbreviation, falling back to a case-insensitive
    /// match of `name_hint` against the full name.
    pub async fn find_team(&self, abbreviation: &str, name_hint: &str) -> ApiResult<BdlTeam> {
        let url = format!("{}/teams", self.base_url);
        let raw: TeamsResponse = self.get(&url).await?;
        select_team(raw.data, abbreviation, name_hint)
            .ok_or_else(|| ApiError::NotFound(format!("team {abbreviation} ({name_hint})")))
    }

    /// All games for `team_id` in `season`, following `meta.next_cursor` to the last page.
    pub async fn fetch_season_games(&self, team_id: u64, season: i32) -> ApiResult<Vec<BdlGame>> {
        let first_page = format!(
            "{}/games?seasons%5B%5D={season}&team_ids%5B%5D={team_id}&per_page={PER_PAGE}",
            self.base_url
        );

        let mut games = Vec::new();
        let mut cursor: Option<u64> = None;
        loop {
            let url = match cursor {
                Some(c) => format!("{first_page}&cursor={c}"),
                None => first_page.clone(),
            };
            let page: GamesResponse = self.get(&url).await?;
            games.extend(page.data);

            match page.meta.and_then(|m| m.next_cursor) {
                // A cursor that does not advance would loop forever.
                Some(next) if cursor != Some(next) => cursor = Some(next),
                _ => break,
            }
        }
        Ok(games)
    }

    /// Team lookup + full season listing, reduced to the sorted home schedule.
    pub async fn fetch_home_schedule(
        &self,
        abbreviation: &str,
        name_hint: &str,
        season: i32,
        generated_at: DateTime<Utc>,
    ) -> ApiResult<Schedule> {
        let team = self.find_team(abbreviation, name_hint).await?;
        let team_name = if team.full_name.is_empty() {
            name_hint.to_owned()
        } else {
            team.full_name.clone()
        };
        let games = self.fetch_season_games(team.id, season).await?;
        let home_games = to_home_games(&games, team.id, &team_name)?;

        Ok(Schedule {
            team_id: team.id,
            team: team_name,
            season,
            generated_at: Some(generated_at),
            home_games,
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: balldontlie wire types → domain types
// ---------------------------------------------------------------------------

fn select_team(mut teams: Vec<BdlTeam>, abbreviation: &str, name_hint: &str) -> Option<BdlTeam> {
    let hint = name_hint.to_lowercase();
    let index = teams
        .iter()
        .position(|t| t.abbreviation.eq_ignore_ascii_case(abbreviation))
        .or_else(|| {
            if hint.is_empty() {
                return None;
            }
            teams.iter().position(|t| t.full_name.to_lowercase().contains(&hint))
        })?;
    Some(teams.swap_remove(index))
}

/// Keep only games hosted by `team_id`, mapped and sorted ascending by tip-off.
pub fn to_home_games(games: &[BdlGame], team_id: u64, team_name: &str) -> ApiResult<Vec<Game>> {
    let mut home = games
        .iter()
        .filter(|g| g.home_team.as_ref().map(|t| t.id) == Some(team_id))
        .map(|g| map_game(g, team_name))
        .collect::<ApiResult<Vec<Game>>>()?;
    home.sort_by_key(Game::tip_off);
    Ok(home)
}

fn map_game(g: &BdlGame, team_name: &str) -> ApiResult<Game> {
    let date = parse_calendar_day(&g.date).map_err(|e| ApiError::Other(format!("game {}: {e}", g.id)))?;
    let datetime = g
        .datetime
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc));

    let visitor = g.visitor_team.as_ref();
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_owned());

    Ok(Game {
        id: g.id,
        date,
        datetime,
        opponent: visitor
            .and_then(|t| non_empty(&t.full_name))
            .unwrap_or_else(|| TBD.to_owned()),
        opponent_abbr: visitor
            .and_then(|t| non_empty(&t.abbreviation))
            .unwrap_or_else(|| TBD.to_owned()),
        home_team: g
            .home_team
            .as_ref()
            .and_then(|t| non_empty(&t.full_name))
            .unwrap_or_else(|| team_name.to_owned()),
        season: g.season,
        status: g.status.clone(),
    })
}
