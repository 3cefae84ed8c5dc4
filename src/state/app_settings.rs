use crate::state::clock::Clock;
use bdl_api::schedule::ScheduleSource;
use log::LevelFilter;

pub const SCHEDULE_ENV: &str = "TIPOFF_SCHEDULE";
pub const NOW_ENV: &str = "TIPOFF_NOW";
pub const LOG_ENV: &str = "TIPOFF_LOG";

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub schedule: ScheduleSource,
    pub clock: Clock,
}

impl AppSettings {
    /// Defaults, overridden by the `TIPOFF_*` environment variables.
    pub fn load() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let schedule = var(SCHEDULE_ENV)
            .filter(|s| !s.trim().is_empty())
            .map(|s| ScheduleSource::parse(&s))
            .unwrap_or_default();
        let log_level = var(LOG_ENV).and_then(|s| s.trim().parse::<LevelFilter>().ok());

        Self {
            full_screen: false,
            log_level,
            schedule,
            clock: Clock::from_override(var(NOW_ENV).as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    #[test]
    fn defaults_read_local_file_with_system_clock() {
        let settings = AppSettings::from_vars(|_| None);
        assert_eq!(settings.schedule, ScheduleSource::File(PathBuf::from("data/games.json")));
        assert_eq!(settings.clock, Clock::System);
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn environment_overrides_apply() {
        let settings = AppSettings::from_vars(|key| match key {
            SCHEDULE_ENV => Some("https://example.com/games.json".into()),
            NOW_ENV => Some("2025-10-21T12:00:00Z".into()),
            LOG_ENV => Some("debug".into()),
            _ => None,
        });
        assert_eq!(settings.schedule, ScheduleSource::Url("https://example.com/games.json".into()));
        assert_eq!(
            settings.clock,
            Clock::Fixed(Utc.with_ymd_and_hms(2025, 10, 21, 12, 0, 0).unwrap())
        );
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
    }
}
