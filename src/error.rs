use std::io;
use thiserror::Error;

/// Custom error type for the rigmon application
#[derive(Error, Debug)]
pub enum RigmonError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Telemetry unavailable: {0}")]
    TelemetryUnavailable(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for the rigmon application
pub type Result<T> = std::result::Result<T, RigmonError>;

impl RigmonError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        RigmonError::Config(msg.into())
    }

    /// Create an invalid URL error
    pub fn invalid_url<S: Into<String>>(msg: S) -> Self {
        RigmonError::InvalidUrl(msg.into())
    }

    pub fn telemetry_unavailable<S: Into<String>>(msg: S) -> Self {
        RigmonError::TelemetryUnavailable(msg.into())
    }

    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        RigmonError::Runtime(msg.into())
    }
}
