//! Serde mirror of the backend's JSON contract and its mapping onto core types.
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use podcast_core::{JobState, LogEntry, ResultSet, StatusRecord, Step};
use podcast_logging::podcast_warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GENERIC_SUBMIT_ERROR: &str = "Failed to start processing.";

/// Body of `POST /process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRequest<'a> {
    pub url: &'a str,
}

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusResponse {
    pub state: String,
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub logs: Vec<WireLogEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireLogEntry {
    #[serde(default)]
    pub time: Option<WireTime>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub stage: Option<String>,
}

/// Log timestamps arrive either as epoch milliseconds or as ISO-8601 text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireTime {
    Millis(f64),
    Text(String),
}

/// Body of a successful `GET /results`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResultsResponse {
    pub transcript_markdown: String,
    pub summary_markdown: String,
    pub thread_markdown: String,
}

/// Error body of a rejected request: `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl StatusResponse {
    pub fn into_record(self) -> StatusRecord {
        StatusRecord {
            state: parse_state(&self.state),
            step: self.step.as_deref().map(Step::parse),
            error: self.error,
            logs: self.logs.into_iter().map(WireLogEntry::into_entry).collect(),
        }
    }
}

impl WireLogEntry {
    pub fn into_entry(self) -> LogEntry {
        LogEntry {
            time_ms: self.time.as_ref().and_then(parse_log_time),
            level: self.level,
            message: self.message,
            stage: self.stage,
        }
    }
}

impl From<ResultsResponse> for ResultSet {
    fn from(response: ResultsResponse) -> Self {
        ResultSet {
            transcript: response.transcript_markdown,
            summary: response.summary_markdown,
            thread: response.thread_markdown,
        }
    }
}

/// Maps the backend's state string. Anything unrecognized keeps the job polling.
pub fn parse_state(raw: &str) -> JobState {
    match raw {
        "idle" => JobState::Idle,
        "running" => JobState::Running,
        "completed" => JobState::Completed,
        "error" => JobState::Error,
        other => {
            podcast_warn!("Unrecognized job state {:?}, treating as running", other);
            JobState::Running
        }
    }
}

/// Milliseconds since the epoch; naive datetimes are taken as UTC.
pub fn parse_log_time(time: &WireTime) -> Option<i64> {
    match time {
        WireTime::Millis(ms) if ms.is_finite() => Some(*ms as i64),
        WireTime::Millis(_) => None,
        WireTime::Text(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.timestamp_millis());
            }
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive).timestamp_millis())
        }
    }
}

/// Extracts a human-readable message from a rejected `POST /process` body.
///
/// A string `detail` is used as is; a list of validation errors is joined by
/// their `msg` fields. Everything else falls back to [`GENERIC_SUBMIT_ERROR`].
pub fn detail_message(body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail);

    let message = match detail {
        Some(Value::String(text)) => text,
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::new(),
    };

    if message.trim().is_empty() {
        GENERIC_SUBMIT_ERROR.to_string()
    } else {
        message
    }
}
