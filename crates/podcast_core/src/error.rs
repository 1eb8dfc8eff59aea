use thiserror::Error;

/// The error currently shown in the single error slot.
///
/// Every variant carries the exact text shown to the user; the variant
/// records where in the job lifecycle it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Bad URL, resolved locally; never reaches the network.
    #[error("{0}")]
    Validation(String),
    /// `POST /process` was rejected or never got a response.
    #[error("{0}")]
    Submission(String),
    /// Contact with the backend was lost mid-polling.
    #[error("{0}")]
    PollTransport(String),
    /// The backend reported `state: error` for the job.
    #[error("{0}")]
    BackendReported(String),
    /// `GET /results` failed after the job completed.
    #[error("{0}")]
    ResultsFetch(String),
}

impl ClientError {
    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation(message)
            | ClientError::Submission(message)
            | ClientError::PollTransport(message)
            | ClientError::BackendReported(message)
            | ClientError::ResultsFetch(message) => message,
        }
    }
}
