use crate::{JobId, MarkdownArtifact};

/// Work the driver must perform on behalf of [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue `POST /process` for the job and report back with `Msg::SubmitFinished`.
    StartJob { job_id: JobId, url: String },
    /// Start (or restart) the recurring status poll for the job.
    StartPolling { job_id: JobId },
    /// Cancel the status poll for the job, if it is still running.
    StopPolling { job_id: JobId },
    /// Issue `GET /results` once and report back with `Msg::ResultsFetched`.
    FetchResults { job_id: JobId },
    /// Hand a finished markdown file to the platform for saving.
    Export(MarkdownArtifact),
}
