//! Client configuration, read from a RON file and overridden from the command line.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use podcast_client::{BackendSettings, DEFAULT_API_BASE, DEFAULT_POLL_INTERVAL};
use podcast_logging::podcast_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "podcast_client.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("api base must be an absolute http(s) URL, got {0:?}")]
    InvalidApiBase(String),
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            output_dir: PathBuf::from("outputs"),
        }
    }
}

impl ClientConfig {
    /// Loads `path`, or `podcast_client.ron` in the working directory when no
    /// path is given. Only the implicit default file may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path, true),
            None => Self::load_from(Path::new(DEFAULT_CONFIG_FILE), false),
        }
    }

    fn load_from(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        podcast_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn api_url(&self) -> Result<Url, ConfigError> {
        match Url::parse(&self.api_base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(url),
            _ => Err(ConfigError::InvalidApiBase(self.api_base.clone())),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_url()?;
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    pub fn backend_settings(&self) -> Result<BackendSettings, ConfigError> {
        Ok(BackendSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..BackendSettings::new(self.api_url()?)
        })
    }
}
