// Command handlers module
pub mod completions;
pub mod config;
pub mod snapshot;
pub mod version;
pub mod watch;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::Config;

/// Saved config with the `--url`, `--interval` and `--timeout` flags applied
/// for this run only.
pub fn effective_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::load().context("Failed to load config")?;

    if let Some(url) = matches.try_get_one::<String>("url").ok().flatten() {
        config.set_base_url(url)?;
    }
    if let Some(ms) = matches.try_get_one::<u64>("interval").ok().flatten() {
        config.set_refresh_ms(*ms)?;
    }
    if let Some(ms) = matches.try_get_one::<u64>("timeout").ok().flatten() {
        config.set_request_timeout_ms(*ms)?;
    }

    Ok(config)
}

// Re-exports for cleaner imports
pub use version::execute as version;
