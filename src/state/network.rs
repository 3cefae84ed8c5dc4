use crate::state::clock::Clock;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use bdl_api::ScheduleError;
use bdl_api::schedule::ScheduleLoader;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    loader: ScheduleLoader,
    clock: Clock,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        loader: ScheduleLoader,
        clock: Clock,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            loader,
            clock,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let response = match request {
                NetworkRequest::LoadSchedule => self.handle_load_schedule().await,
            };

            let failed = matches!(
                response,
                NetworkResponse::ScheduleLoaded { outcome: Err(ScheduleError::LoadFailure(_)) }
            );
            debug!("network request complete");
            self.stop_loading_animation(!failed).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_schedule(&self) -> NetworkResponse {
        debug!("loading schedule from {}", self.loader.source());
        let outcome = self.loader.load_upcoming(self.clock.now()).await;
        match &outcome {
            Ok(games) => info!("{} upcoming home games", games.len()),
            Err(ScheduleError::EmptySchedule) => info!("no upcoming home games"),
            Err(e) => warn!("{e}"),
        }
        NetworkResponse::ScheduleLoaded { outcome }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdl_api::schedule::ScheduleSource;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    #[tokio::test]
    async fn unreadable_schedule_reports_load_failure_and_error_spinner() {
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let loader = ScheduleLoader::new(ScheduleSource::File(PathBuf::from(
            "/definitely/not/here/games.json",
        )));
        let clock = Clock::Fixed(Utc.with_ymd_and_hms(2025, 10, 21, 12, 0, 0).unwrap());
        let worker = tokio::spawn(NetworkWorker::new(loader, clock, req_rx, resp_tx).run());

        req_tx.send(NetworkRequest::LoadSchedule).await.unwrap();

        let mut last_spinner = None;
        let outcome = loop {
            match resp_rx.recv().await.unwrap() {
                NetworkResponse::LoadingStateChanged { loading_state } => {
                    last_spinner = Some(loading_state);
                }
                NetworkResponse::ScheduleLoaded { outcome } => break outcome,
            }
        };
        worker.abort();

        assert!(matches!(outcome, Err(ScheduleError::LoadFailure(_))));
        let spinner = last_spinner.unwrap();
        assert!(!spinner.is_loading);
        assert_eq!(spinner.spinner_char, ERROR_CHAR);
    }
}
