use crate::state::network::LoadingState;
use bdl_api::{Game, ScheduleError};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadSchedule,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// Games still ahead of the load time, soonest first, or why there are none.
    ScheduleLoaded { outcome: Result<Vec<Game>, ScheduleError> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    CountdownTick { generation: u64 },
}
