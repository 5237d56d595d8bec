use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::telemetry::{DEFAULT_BASE_URL, DEFAULT_REFRESH_MS};
use crate::error::{Result, RigmonError};

/// Default per-request timeout for the telemetry endpoint
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2000;

/// Lower bound for both the refresh interval and the request timeout
pub const MIN_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the telemetry server (the stats path is appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_refresh_ms() -> u64 {
    DEFAULT_REFRESH_MS
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            refresh_ms: default_refresh_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Config {
    /// Load the config from the user config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load the config from an explicit file.
    ///
    /// A missing, empty or unreadable-as-JSON file yields the defaults.
    /// Stored values that the setters would reject fall back to their
    /// defaults one by one.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        match serde_json::from_str::<Config>(&data) {
            Ok(config) => Ok(config.sanitized(path)),
            Err(e) => {
                log::warn!("Ignoring corrupted config {}: {}", path.display(), e);
                Ok(Config::default())
            }
        }
    }

    fn sanitized(mut self, path: &Path) -> Self {
        match validate_base_url(&self.base_url) {
            Ok(url) => self.base_url = url,
            Err(e) => {
                log::warn!("Ignoring base_url in {}: {}", path.display(), e);
                self.base_url = default_base_url();
            }
        }
        if let Err(e) = validate_interval("refresh interval", self.refresh_ms) {
            log::warn!("Ignoring refresh_ms in {}: {}", path.display(), e);
            self.refresh_ms = default_refresh_ms();
        }
        if let Err(e) = validate_interval("request timeout", self.request_timeout_ms) {
            log::warn!("Ignoring request_timeout_ms in {}: {}", path.display(), e);
            self.request_timeout_ms = default_request_timeout_ms();
        }
        self
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RigmonError::config("Could not determine config directory"))?;

        Ok(config_dir.join("rigmon").join("config.json"))
    }

    /// Set the base URL after checking it is an absolute http(s) URL.
    pub fn set_base_url(&mut self, raw: &str) -> Result<()> {
        self.base_url = validate_base_url(raw)?;
        Ok(())
    }

    pub fn set_refresh_ms(&mut self, ms: u64) -> Result<()> {
        self.refresh_ms = validate_interval("refresh interval", ms)?;
        Ok(())
    }

    pub fn set_request_timeout_ms(&mut self, ms: u64) -> Result<()> {
        self.request_timeout_ms = validate_interval("request timeout", ms)?;
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Normalize a base URL: must parse, use http or https, and carry a host.
/// A trailing slash is stripped so the stats path can be appended.
pub fn validate_base_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| RigmonError::invalid_url(format!("{}: {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(RigmonError::invalid_url(format!(
                "unsupported scheme '{}' (expected http or https)",
                other
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(RigmonError::invalid_url(format!("{}: missing host", raw)));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn validate_interval(name: &str, ms: u64) -> Result<u64> {
    if ms < MIN_INTERVAL_MS {
        return Err(RigmonError::config(format!(
            "{} must be at least {}ms (got {}ms)",
            name, MIN_INTERVAL_MS, ms
        )));
    }
    Ok(ms)
}
