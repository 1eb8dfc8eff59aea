#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use podcast_client::{ApiError, Backend};
use podcast_core::{JobState, ResultSet, StatusRecord, Step};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(podcast_logging::initialize_for_tests);
}

/// In-memory backend replaying scripted replies and counting calls.
///
/// Once the status script runs out every further poll sees a running job.
#[derive(Default)]
pub struct ScriptedBackend {
    start_reply: Mutex<Option<ApiError>>,
    statuses: Mutex<VecDeque<Result<StatusRecord, ApiError>>>,
    results: Mutex<Option<Result<ResultSet, ApiError>>>,
    status_delay: Mutex<Option<Duration>>,
    counters: Arc<Counters>,
}

#[derive(Default)]
pub struct Counters {
    pub starts: AtomicUsize,
    pub statuses: AtomicUsize,
    pub results: AtomicUsize,
}

impl Counters {
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn statuses(&self) -> usize {
        self.statuses.load(Ordering::SeqCst)
    }

    pub fn results(&self) -> usize {
        self.results.load(Ordering::SeqCst)
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_start(self, error: ApiError) -> Self {
        *self.start_reply.lock().unwrap() = Some(error);
        self
    }

    pub fn with_statuses(self, statuses: Vec<Result<StatusRecord, ApiError>>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_results(self, results: Result<ResultSet, ApiError>) -> Self {
        *self.results.lock().unwrap() = Some(results);
        self
    }

    pub fn with_status_delay(self, delay: Duration) -> Self {
        *self.status_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn counters(&self) -> Arc<Counters> {
        self.counters.clone()
    }
}

#[async_trait::async_trait]
impl Backend for ScriptedBackend {
    async fn start_job(&self, _url: &str) -> Result<(), ApiError> {
        self.counters.starts.fetch_add(1, Ordering::SeqCst);
        match self.start_reply.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn fetch_status(&self) -> Result<StatusRecord, ApiError> {
        self.counters.statuses.fetch_add(1, Ordering::SeqCst);
        let delay = *self.status_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.statuses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(running(Step::Llm)))
    }

    async fn fetch_results(&self) -> Result<ResultSet, ApiError> {
        self.counters.results.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(ResultSet::default()))
    }
}

pub fn running(step: Step) -> StatusRecord {
    StatusRecord {
        state: JobState::Running,
        step: Some(step),
        ..StatusRecord::default()
    }
}

pub fn completed() -> StatusRecord {
    StatusRecord {
        state: JobState::Completed,
        step: Some(Step::Complete),
        ..StatusRecord::default()
    }
}
