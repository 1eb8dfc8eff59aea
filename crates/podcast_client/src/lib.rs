//! Podcast client IO: backend HTTP contract, status polling and effect execution.
mod backend;
mod persist;
mod poller;
mod session;
mod wire;

pub use backend::{ApiError, Backend, BackendSettings, ReqwestBackend, DEFAULT_API_BASE};
pub use persist::{ensure_output_dir, save_artifact, AtomicFileWriter, PersistError};
pub use poller::{Poller, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
pub use session::Session;
pub use wire::{
    detail_message, parse_log_time, parse_state, ErrorBody, ProcessRequest, ResultsResponse,
    StatusResponse, WireLogEntry, WireTime, GENERIC_SUBMIT_ERROR,
};
