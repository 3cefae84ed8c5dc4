use crate::state::ticker::CountdownTicker;
use chrono::{DateTime, Utc};
use std::fmt;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

pub const STARTED_TEXT: &str = "Tip-off!";

/// Time left until tip-off, broken down largest unit first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Remaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    /// Negative differences clamp to zero.
    pub fn from_millis(diff_ms: i64) -> Self {
        let mut ms = u64::try_from(diff_ms).unwrap_or(0);
        let days = ms / MS_PER_DAY;
        ms -= days * MS_PER_DAY;
        let hours = ms / MS_PER_HOUR;
        ms -= hours * MS_PER_HOUR;
        let minutes = ms / MS_PER_MINUTE;
        ms -= minutes * MS_PER_MINUTE;
        let seconds = ms / MS_PER_SECOND;
        Self { days, hours, minutes, seconds }
    }

    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_millis((target - now).num_milliseconds())
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    Running,
    /// Terminal.
    Started,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Same text as the previous tick; nothing to redraw.
    Unchanged,
    Updated,
    /// Reported once, on the tick that reaches the target.
    Started,
    /// Already started; the tick was ignored.
    Idle,
}

/// Countdown to a single fixed target.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: DateTime<Utc>,
    phase: CountdownPhase,
    text: String,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            phase: CountdownPhase::Running,
            text: String::new(),
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if self.phase == CountdownPhase::Started {
            return TickOutcome::Idle;
        }

        if now >= self.target {
            self.phase = CountdownPhase::Started;
            self.text = STARTED_TEXT.to_owned();
            return TickOutcome::Started;
        }

        let text = Remaining::until(self.target, now).to_string();
        if text == self.text {
            return TickOutcome::Unchanged;
        }
        self.text = text;
        TickOutcome::Updated
    }
}

/// Owns the current countdown together with the single ticker driving it.
pub struct CountdownEngine {
    countdown: Option<Countdown>,
    ticker: CountdownTicker,
}

impl CountdownEngine {
    pub fn new(ticker: CountdownTicker) -> Self {
        Self { countdown: None, ticker }
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Replace any running countdown. The first tick happens immediately; the
    /// ticker only starts if the target is still ahead.
    pub fn start(&mut self, target: DateTime<Utc>, now: DateTime<Utc>) {
        self.ticker.cancel();
        let mut countdown = Countdown::new(target);
        if countdown.tick(now) != TickOutcome::Started {
            self.ticker.start();
        }
        self.countdown = Some(countdown);
    }

    pub fn stop(&mut self) {
        self.ticker.cancel();
        self.countdown = None;
    }

    /// Returns true when the display needs a redraw.
    pub fn on_tick(&mut self, generation: u64, now: DateTime<Utc>) -> bool {
        if generation != self.ticker.generation() {
            return false;
        }
        let Some(countdown) = self.countdown.as_mut() else {
            return false;
        };
        match countdown.tick(now) {
            TickOutcome::Updated => true,
            TickOutcome::Started => {
                self.ticker.cancel();
                true
            }
            TickOutcome::Unchanged | TickOutcome::Idle => false,
        }
    }
}
