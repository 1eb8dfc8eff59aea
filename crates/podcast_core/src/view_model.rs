use crate::{JobState, LogEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub label: String,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientViewModel {
    pub job_state: JobState,
    pub processing: bool,
    pub can_submit: bool,
    /// `None` while idle.
    pub progress: Option<ProgressView>,
    pub last_error: Option<String>,
    pub logs: Vec<LogEntry>,
    pub transcript: String,
    pub summary: String,
    pub thread: String,
    pub dirty: bool,
}
