use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::countdown::CountdownEngine;
use crate::state::messages::UiEvent;
use crate::state::ticker::CountdownTicker;
use crate::state::view::ViewState;
use bdl_api::{Game, ScheduleError};
use tokio::sync::mpsc;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Countdown,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, ui_events: mpsc::Sender<UiEvent>) -> Self {
        let app = Self {
            state: AppState::new(CountdownEngine::new(CountdownTicker::new(ui_events))),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Schedule and countdown events, driven by main_ui_loop
    // -----------------------------------------------------------------------

    /// Map the load outcome to the view and (re)start the countdown for the next game.
    pub fn on_schedule_loaded(&mut self, outcome: Result<Vec<Game>, ScheduleError>) {
        let now = self.settings.clock.now();
        self.state.view = ViewState::from_outcome(&outcome, now);
        match self.state.view.game().map(|g| g.tip_off) {
            Some(tip_off) => self.state.countdown.start(tip_off, now),
            None => self.state.countdown.stop(),
        }
    }

    /// Returns true when the countdown text or the day label changed.
    pub fn on_countdown_tick(&mut self, generation: u64) -> bool {
        let now = self.settings.clock.now();
        let day_changed = self.state.view.refresh_day(now);
        self.state.countdown.on_tick(generation, now) || day_changed
    }

    /// Back to the loading state; the caller issues the new request.
    pub fn begin_reload(&mut self) {
        self.state.countdown.stop();
        self.state.view = ViewState::Loading;
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::clock::Clock;
    use crate::state::countdown::CountdownPhase;
    use crate::state::view::TODAY_LABEL;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 21, 19, 0, 0).unwrap()
    }

    fn app() -> (App, mpsc::Receiver<UiEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let settings = AppSettings { clock: Clock::Fixed(now()), ..Default::default() };
        (App::new(settings, tx), rx)
    }

    fn game(id: u64, tip: DateTime<Utc>) -> Game {
        Game {
            id,
            date: tip.date_naive(),
            datetime: Some(tip),
            opponent: format!("Opponent {id}"),
            opponent_abbr: "OPP".into(),
            home_team: "Los Angeles Clippers".into(),
            season: 2025,
            status: "Scheduled".into(),
        }
    }

    #[tokio::test]
    async fn loaded_schedule_starts_countdown_to_next_game() {
        let (mut app, _rx) = app();
        let tip = now() + Duration::hours(3);

        app.on_schedule_loaded(Ok(vec![game(1, tip), game(2, tip + Duration::days(2))]));

        let countdown = app.state.countdown.countdown().unwrap();
        assert_eq!(app.state.view.game().unwrap().tip_off, tip);
        assert_eq!(countdown.text(), "3h 0m 0s");
        assert!(app.state.countdown.is_ticking());
        assert_eq!(app.state.view.game().unwrap().upcoming.len(), 1);
    }

    #[tokio::test]
    async fn failures_stop_any_running_countdown() {
        let (mut app, _rx) = app();
        app.on_schedule_loaded(Ok(vec![game(1, now() + Duration::hours(3))]));

        app.on_schedule_loaded(Err(ScheduleError::LoadFailure("gone".into())));

        assert!(app.state.countdown.countdown().is_none());
        assert!(!app.state.countdown.is_ticking());
        assert!(matches!(app.state.view, ViewState::Error { .. }));
    }

    #[tokio::test]
    async fn game_at_exactly_now_is_started_immediately() {
        let (mut app, _rx) = app();

        app.on_schedule_loaded(Ok(vec![game(1, now())]));

        let countdown = app.state.countdown.countdown().unwrap();
        assert_eq!(countdown.phase(), CountdownPhase::Started);
        assert!(!app.state.countdown.is_ticking());
    }

    #[tokio::test]
    async fn tick_after_pacific_midnight_relabels_the_game_as_today() {
        let (mut app, _rx) = app();
        // 00:00 UTC Oct 21 is 5 PM PT Oct 20; tip-off is 7:30 PM PT Oct 21.
        let tip = Utc.with_ymd_and_hms(2025, 10, 22, 2, 30, 0).unwrap();
        app.settings.clock = Clock::Fixed(Utc.with_ymd_and_hms(2025, 10, 21, 0, 0, 0).unwrap());
        app.on_schedule_loaded(Ok(vec![game(1, tip)]));
        assert!(!app.state.view.game().unwrap().is_today);

        // 12:00:30 AM PT on game day.
        app.settings.clock = Clock::Fixed(Utc.with_ymd_and_hms(2025, 10, 21, 7, 0, 30).unwrap());
        assert!(app.on_countdown_tick(1));

        let game = app.state.view.game().unwrap();
        assert!(game.is_today);
        assert_eq!(game.when, TODAY_LABEL);
    }

    #[tokio::test]
    async fn reload_returns_to_loading() {
        let (mut app, _rx) = app();
        app.on_schedule_loaded(Ok(vec![game(1, now() + Duration::hours(3))]));

        app.begin_reload();

        assert_eq!(app.state.view, ViewState::Loading);
        assert!(!app.state.countdown.is_ticking());
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let (tx, _rx) = mpsc::channel(1);
        let mut app = App::new(AppSettings::default(), tx);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Countdown);
    }
}
