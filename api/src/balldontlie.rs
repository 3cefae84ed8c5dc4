/// Raw balldontlie v1 response shapes.
/// These map to our domain types via the functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Teams  (GET /v1/teams)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsResponse {
    #[serde(default)]
    pub data: Vec<BdlTeam>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct BdlTeam {
    pub id: u64,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub full_name: String,
    pub name: Option<String>,
    pub city: Option<String>,
    pub conference: Option<String>,
    pub division: Option<String>,
}

// ---------------------------------------------------------------------------
// Games  (GET /v1/games, cursor-paginated)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GamesResponse {
    #[serde(default)]
    pub data: Vec<BdlGame>,
    pub meta: Option<BdlMeta>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BdlMeta {
    /// Absent on the last page.
    pub next_cursor: Option<u64>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BdlGame {
    pub id: u64,
    /// "YYYY-MM-DD"
    pub date: String,
    /// Full ISO timestamp; null until a tip-off time is scheduled.
    pub datetime: Option<String>,
    #[serde(default)]
    pub season: i32,
    /// "Final", "4th Qtr", or an ISO start time for scheduled games.
    #[serde(default)]
    pub status: String,
    pub period: Option<u8>,
    pub time: Option<String>,
    pub postseason: Option<bool>,
    pub home_team_score: Option<u16>,
    pub visitor_team_score: Option<u16>,
    pub home_team: Option<BdlTeam>,
    pub visitor_team: Option<BdlTeam>,
}
