use crate::{Artifact, JobId, ResultSet, StatusRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User asked to process the current URL input.
    SubmitClicked,
    /// `POST /process` finished; the error carries the user-facing detail.
    SubmitFinished {
        job_id: JobId,
        result: Result<(), String>,
    },
    /// One poll tick fetched the job status; the error is a transport failure.
    StatusFetched {
        job_id: JobId,
        result: Result<StatusRecord, String>,
    },
    /// `GET /results` finished; the error is the raw response body.
    ResultsFetched {
        job_id: JobId,
        result: Result<ResultSet, String>,
    },
    /// User edited the summary buffer.
    SummaryEdited(String),
    /// User edited the X thread buffer.
    ThreadEdited(String),
    /// User clicked the download button of one of the outputs.
    ExportClicked(Artifact),
    /// The platform is tearing the client down.
    Shutdown,
}
