// Rigmon Library - Public API

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

// Re-export error types
pub mod error;
pub use error::{Result, RigmonError};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

fn logger_builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Warn).parse_default_env();
    builder
}

// Initialize logging to stderr (RUST_LOG overrides the default level)
pub fn init_logging() {
    logger_builder().init();
}

/// Initialize logging into a file. Used while the TUI owns the terminal.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    logger_builder()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Default log file for TUI sessions
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("rigmon").join("rigmon.log"))
}
