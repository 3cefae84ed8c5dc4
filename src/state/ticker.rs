use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to the one recurring countdown task.
///
/// Each `start` aborts the previous task and bumps the generation; ticks carry
/// the generation they were started with so a late tick from an aborted task
/// can be told apart from a current one.
pub struct CountdownTicker {
    ui_events: mpsc::Sender<UiEvent>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl CountdownTicker {
    pub fn new(ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { ui_events, task: None, generation: 0 }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    pub fn start(&mut self) -> u64 {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let ui_events = self.ui_events.clone();
        self.task = Some(tokio::spawn(async move {
            let mut ticks = interval(TICK_INTERVAL);
            // The caller has already run the first tick synchronously.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                if ui_events.send(UiEvent::CountdownTick { generation }).await.is_err() {
                    break;
                }
            }
        }));
        generation
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
