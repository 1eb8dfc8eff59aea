use crate::view_model::{ClientViewModel, ProgressView};
use crate::{Artifact, ClientError, Step};

/// Generation token identifying one submission.
pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running,
    Completed,
    Error,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Completed | JobState::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch, when the backend sent a usable time.
    pub time_ms: Option<i64>,
    pub level: String,
    pub message: String,
    pub stage: Option<String>,
}

/// One `GET /status` reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusRecord {
    pub state: JobState,
    pub step: Option<Step>,
    pub error: Option<String>,
    pub logs: Vec<LogEntry>,
}

/// The final artifacts of a completed job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    pub transcript: String,
    pub summary: String,
    pub thread: String,
}

/// What the client is currently waiting on. `processing` is derived from it,
/// so it is true exactly while a request is in flight or the poll is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Activity {
    #[default]
    None,
    Submitting,
    Polling,
    Hydrating,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientState {
    url_input: String,
    job_state: JobState,
    current_step: Option<Step>,
    last_error: Option<ClientError>,
    logs: Vec<LogEntry>,
    transcript: String,
    summary: String,
    thread: String,
    activity: Activity,
    current_job: Option<JobId>,
    last_job_id: JobId,
    results_requested: bool,
    dirty: bool,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ClientViewModel {
        let progress = match self.job_state {
            JobState::Idle => None,
            state => Some(ProgressView {
                label: self
                    .current_step
                    .as_ref()
                    .map_or("Running", Step::label)
                    .to_string(),
                caption: match state {
                    JobState::Completed => "Finished",
                    JobState::Error => "Error",
                    _ => "In progress",
                },
            }),
        };

        ClientViewModel {
            job_state: self.job_state,
            processing: self.processing(),
            can_submit: !self.processing() && !self.url_input.is_empty(),
            progress,
            last_error: self.last_error_message().map(ToOwned::to_owned),
            logs: self.logs.clone(),
            transcript: self.transcript.clone(),
            summary: self.summary.clone(),
            thread: self.thread.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn job_state(&self) -> JobState {
        self.job_state
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.current_step.as_ref()
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn last_error_message(&self) -> Option<&str> {
        self.last_error.as_ref().map(ClientError::message)
    }

    pub fn processing(&self) -> bool {
        self.activity != Activity::None
    }

    pub fn is_polling(&self) -> bool {
        self.activity == Activity::Polling
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn thread(&self) -> &str {
        &self.thread
    }

    pub fn buffer(&self, artifact: Artifact) -> &str {
        match artifact {
            Artifact::Transcript => &self.transcript,
            Artifact::Summary => &self.summary,
            Artifact::Thread => &self.thread,
        }
    }

    pub fn current_job(&self) -> Option<JobId> {
        self.current_job
    }

    pub(crate) fn activity(&self) -> Activity {
        self.activity
    }

    /// True when `job_id` is the live job and the client is waiting on `activity` for it.
    pub(crate) fn expects(&self, job_id: JobId, activity: Activity) -> bool {
        self.current_job == Some(job_id) && self.activity == activity
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_error(&mut self, error: ClientError) {
        self.last_error = Some(error);
        self.dirty = true;
    }

    /// Resets everything a previous job left behind and allocates a new job id.
    pub(crate) fn begin_submission(&mut self) -> JobId {
        self.last_job_id += 1;
        let job_id = self.last_job_id;

        self.job_state = JobState::Running;
        self.current_step = Some(Step::Init);
        self.last_error = None;
        self.logs.clear();
        self.transcript.clear();
        self.summary.clear();
        self.thread.clear();
        self.activity = Activity::Submitting;
        self.current_job = Some(job_id);
        self.results_requested = false;
        self.dirty = true;
        job_id
    }

    pub(crate) fn begin_polling(&mut self) {
        self.activity = Activity::Polling;
        self.dirty = true;
    }

    /// Applies a status record in one step: state, step, error and logs
    /// (full replace) never disagree with each other. The reported state is
    /// taken as is, so an idle report mid-job hides progress while polling
    /// continues.
    pub(crate) fn apply_status(&mut self, record: StatusRecord, default_error: &str) {
        self.job_state = record.state;
        self.current_step = record.step;
        self.logs = record.logs;
        if record.state == JobState::Error {
            let message = record
                .error
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| default_error.to_string());
            self.last_error = Some(ClientError::BackendReported(message));
        }
        self.dirty = true;
    }

    /// Moves from polling to the one-shot results fetch. Returns false when
    /// results were already requested for this job.
    pub(crate) fn begin_hydration(&mut self) -> bool {
        if self.results_requested {
            return false;
        }
        self.results_requested = true;
        self.activity = Activity::Hydrating;
        self.dirty = true;
        true
    }

    pub(crate) fn apply_results(&mut self, results: ResultSet) {
        self.transcript = results.transcript;
        self.summary = results.summary;
        self.thread = results.thread;
        self.dirty = true;
    }

    pub(crate) fn set_buffer(&mut self, artifact: Artifact, text: String) {
        let buffer = match artifact {
            Artifact::Transcript => &mut self.transcript,
            Artifact::Summary => &mut self.summary,
            Artifact::Thread => &mut self.thread,
        };
        if *buffer != text {
            *buffer = text;
            self.dirty = true;
        }
    }

    pub(crate) fn mark_job_failed(&mut self) {
        self.job_state = JobState::Error;
        self.dirty = true;
    }

    /// Nothing is in flight or scheduled any more.
    pub(crate) fn settle(&mut self) {
        self.activity = Activity::None;
        self.dirty = true;
    }
}
