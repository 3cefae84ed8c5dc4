use crate::app::MenuItem;
use crate::state::countdown::CountdownEngine;
use crate::state::view::ViewState;

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub view: ViewState,
    pub countdown: CountdownEngine,
    pub show_logs: bool,
}

impl AppState {
    pub fn new(countdown: CountdownEngine) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            view: ViewState::default(),
            countdown,
            show_logs: false,
        }
    }
}
