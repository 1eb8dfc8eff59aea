use std::time::Duration;

use podcast_core::{ResultSet, StatusRecord};
use podcast_logging::{podcast_debug, podcast_trace};
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{detail_message, ProcessRequest, ResultsResponse, StatusResponse};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl BackendSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// `POST /process` answered with a non-success status.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    /// `GET /results` answered with a non-success status; `body` is the raw text.
    #[error("{body}")]
    Results { status: u16, body: String },
    /// `GET /status` answered with a non-success status.
    #[error("status check failed: http status {status}")]
    Status { status: u16 },
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Transport(String),
    #[error("invalid response from backend: {0}")]
    Decode(String),
}

/// The three endpoints the client depends on.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// `POST /process` with the episode URL.
    async fn start_job(&self, url: &str) -> Result<(), ApiError>;

    /// `GET /status`.
    async fn fetch_status(&self) -> Result<StatusRecord, ApiError>;

    /// `GET /results`.
    async fn fetch_results(&self) -> Result<ResultSet, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        // `Url::join` replaces the last path segment unless the base ends in '/'.
        let mut base_url = settings.base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(name)
            .map_err(|err| ApiError::Transport(format!("invalid endpoint {name}: {err}")))
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn start_job(&self, url: &str) -> Result<(), ApiError> {
        let endpoint = self.endpoint("process")?;
        podcast_debug!("POST {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .json(&ProcessRequest { url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // An unreadable body still counts as a rejection with the generic message.
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail: detail_message(&body),
        })
    }

    async fn fetch_status(&self) -> Result<StatusRecord, ApiError> {
        let endpoint = self.endpoint("status")?;
        podcast_trace!("GET {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        let parsed: StatusResponse = decode(&body)?;
        Ok(parsed.into_record())
    }

    async fn fetch_results(&self) -> Result<ResultSet, ApiError> {
        let endpoint = self.endpoint("results")?;
        podcast_debug!("GET {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(ApiError::Results {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ResultsResponse = decode(&body)?;
        Ok(parsed.into())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    ApiError::Transport(err.to_string())
}
