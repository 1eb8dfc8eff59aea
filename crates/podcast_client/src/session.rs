use std::sync::Arc;
use std::time::Duration;

use podcast_core::{update, ClientState, ClientViewModel, Effect, MarkdownArtifact, Msg};
use podcast_logging::{podcast_debug, podcast_info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{Backend, Poller};

/// Drives one client: owns the state, runs effects, and feeds their outcomes
/// back through [`update`]. All state changes happen in [`Session::dispatch`].
pub struct Session<B> {
    state: ClientState,
    backend: Arc<B>,
    poller: Poller,
    msg_tx: UnboundedSender<Msg>,
    msg_rx: UnboundedReceiver<Msg>,
    exports: Vec<MarkdownArtifact>,
}

impl<B: Backend + 'static> Session<B> {
    pub fn new(backend: B, poll_interval: Duration) -> Self {
        Self::with_shared_backend(Arc::new(backend), poll_interval)
    }

    pub fn with_shared_backend(backend: Arc<B>, poll_interval: Duration) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            state: ClientState::new(),
            backend,
            poller: Poller::new(poll_interval),
            msg_tx,
            msg_rx,
            exports: Vec::new(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn view(&self) -> ClientViewModel {
        self.state.view()
    }

    /// Returns whether the view changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    /// A handle for injecting messages (user edits, shutdown) from elsewhere.
    pub fn sender(&self) -> UnboundedSender<Msg> {
        self.msg_tx.clone()
    }

    /// Sets the URL input and submits it.
    pub fn submit(&mut self, url: &str) {
        self.dispatch(Msg::InputChanged(url.to_string()));
        self.dispatch(Msg::SubmitClicked);
    }

    /// Applies one message and executes the effects it produced.
    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    /// Waits for the next message produced by an effect.
    ///
    /// Cancel safe: dropping the future loses no message.
    pub async fn next_message(&mut self) -> Option<Msg> {
        self.msg_rx.recv().await
    }

    /// Waits for one message and dispatches it.
    pub async fn step(&mut self) {
        if let Some(msg) = self.next_message().await {
            self.dispatch(msg);
        }
    }

    /// Pumps messages until nothing is in flight or scheduled any more.
    pub async fn run_until_settled(&mut self) {
        while self.state.processing() {
            self.step().await;
        }
    }

    /// Stops polling and drops whatever is still in flight.
    pub fn shutdown(&mut self) {
        self.dispatch(Msg::Shutdown);
        self.poller.stop();
    }

    /// Files requested through `Msg::ExportClicked` since the last call.
    pub fn take_exports(&mut self) -> Vec<MarkdownArtifact> {
        std::mem::take(&mut self.exports)
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StartJob { job_id, url } => {
                let backend = self.backend.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = backend.start_job(&url).await.map_err(|err| err.to_string());
                    let _ = tx.send(Msg::SubmitFinished { job_id, result });
                });
            }
            Effect::StartPolling { job_id } => {
                self.poller.start(job_id, self.backend.clone(), self.msg_tx.clone());
            }
            Effect::StopPolling { job_id } => {
                self.poller.stop_job(job_id);
            }
            Effect::FetchResults { job_id } => {
                podcast_info!("Fetching results for job {}", job_id);
                let backend = self.backend.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = backend.fetch_results().await.map_err(|err| err.to_string());
                    let _ = tx.send(Msg::ResultsFetched { job_id, result });
                });
            }
            Effect::Export(artifact) => {
                podcast_debug!(
                    "Export requested: {} ({} bytes)",
                    artifact.filename,
                    artifact.bytes.len()
                );
                self.exports.push(artifact);
            }
        }
    }
}
