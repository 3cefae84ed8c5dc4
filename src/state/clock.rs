use chrono::{DateTime, Utc};
use log::warn;

/// Source of "now" for schedule filtering and the countdown.
///
/// `Fixed` is the developer override (`--now` / `TIPOFF_NOW`) and what the
/// tests use; it never advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(instant) => *instant,
        }
    }

    /// An unparsable override is ignored in favour of the real clock.
    pub fn from_override(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Clock::System;
        };
        match DateTime::parse_from_rfc3339(raw) {
            Ok(instant) => Clock::Fixed(instant.with_timezone(&Utc)),
            Err(e) => {
                warn!("ignoring invalid time override {raw:?}: {e}");
                Clock::System
            }
        }
    }
}
