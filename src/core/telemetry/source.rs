use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use super::snapshot::TelemetrySnapshot;
use super::API_STATS_PATH;
use crate::core::config::validate_base_url;
use crate::error::Result;

/// Why a snapshot could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("endpoint unreachable: {0}")]
    Transport(String),

    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error("malformed snapshot: {0}")]
    Decode(String),
}

/// Where snapshots come from.
pub trait SnapshotSource {
    fn fetch(&self) -> impl Future<Output = std::result::Result<TelemetrySnapshot, FetchError>> + Send;

    /// Human readable origin, for logs and headers
    fn describe(&self) -> String;
}

/// Fetches snapshots from `GET {base_url}/api/stats`.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = validate_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .user_agent(concat!("rigmon/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}{}", base, API_STATS_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> std::result::Result<TelemetrySnapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
