//! Podcast client core: pure job-lifecycle state machine and view-model helpers.
mod effect;
mod error;
mod export;
mod msg;
mod state;
mod step;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use error::ClientError;
pub use export::{export, Artifact, MarkdownArtifact, MARKDOWN_CONTENT_TYPE};
pub use msg::Msg;
pub use state::{ClientState, JobId, JobState, LogEntry, ResultSet, StatusRecord};
pub use step::Step;
pub use update::{update, INVALID_URL_MESSAGE, PROCESSING_FAILED_MESSAGE};
pub use validate::is_valid_job_url;
pub use view_model::{ClientViewModel, ProgressView};
