use crate::time_format::{fmt_date_time, is_same_day_pt};
use bdl_api::{Game, ScheduleError};
use chrono::{DateTime, Utc};

pub const TODAY_LABEL: &str = "TODAY";

/// Which region of the screen is showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Loading,
    Error { message: String },
    Empty,
    HasGame(GameView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    /// "Denver Nuggets @ Clippers"
    pub matchup: String,
    /// `TODAY`, or the PT date and time.
    pub when: String,
    pub is_today: bool,
    pub tip_off: DateTime<Utc>,
    /// Everything after the next game; empty hides the list.
    pub upcoming: Vec<UpcomingRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingRow {
    pub opponent: String,
    pub when: String,
}

impl GameView {
    pub fn upcoming_title(&self) -> String {
        format!("Upcoming Home Games ({})", self.upcoming.len())
    }

    /// Re-derive the `TODAY` label for `now`. Returns true if it changed.
    pub fn refresh_day(&mut self, now: DateTime<Utc>) -> bool {
        let is_today = is_same_day_pt(now, self.tip_off);
        if is_today == self.is_today {
            return false;
        }
        self.is_today = is_today;
        self.when = when_label(self.tip_off, is_today);
        true
    }
}

fn when_label(tip_off: DateTime<Utc>, is_today: bool) -> String {
    if is_today { TODAY_LABEL.to_owned() } else { fmt_date_time(tip_off) }
}

impl ViewState {
    /// `games` is the loader's output: upcoming only, soonest first.
    pub fn from_outcome(outcome: &Result<Vec<Game>, ScheduleError>, now: DateTime<Utc>) -> Self {
        let games = match outcome {
            Ok(games) => games,
            Err(ScheduleError::EmptySchedule) => return ViewState::Empty,
            Err(e @ ScheduleError::LoadFailure(_)) => {
                return ViewState::Error { message: e.to_string() };
            }
        };
        let Some((next, rest)) = games.split_first() else {
            return ViewState::Empty;
        };

        let tip_off = next.tip_off();
        let is_today = is_same_day_pt(now, tip_off);
        ViewState::HasGame(GameView {
            matchup: format!("{} @ {}", next.opponent, next.home_nickname()),
            when: when_label(tip_off, is_today),
            is_today,
            tip_off,
            upcoming: rest
                .iter()
                .map(|g| UpcomingRow {
                    opponent: g.opponent.clone(),
                    when: fmt_date_time(g.tip_off()),
                })
                .collect(),
        })
    }

    pub fn game(&self) -> Option<&GameView> {
        match self {
            ViewState::HasGame(view) => Some(view),
            _ => None,
        }
    }
    pub fn refresh_day(&mut self, now: DateTime<Utc>) -> bool {
        match self {
            ViewState::HasGame(view) => view.refresh_day(now),
            _ => false,
        }
    }
}
