//! Live dashboard command handler.
//!
//! Polls the telemetry endpoint and shows the result in a TUI dashboard, or
//! as one status line per cycle with `--plain`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::telemetry::{HttpSnapshotSource, TelemetryRuntime};
use crate::core::Config;
use crate::ui::dashboard_tui::{run_dashboard_app, DashboardAppConfig};
use crate::ui::format_status_line;

/// Execute the watch command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::effective_config(matches)?;

    if matches.get_flag("plain") {
        return run_plain_output(&config);
    }

    let app_config = DashboardAppConfig {
        base_url: config.base_url.clone(),
        interval: config.refresh_interval(),
        request_timeout: config.request_timeout(),
    };

    run_dashboard_app(app_config).context("Failed to run dashboard")
}

/// Print one status line per cycle until Ctrl-C
fn run_plain_output(config: &Config) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl-C handler")?;

    let source = HttpSnapshotSource::new(&config.base_url, config.request_timeout())?;
    let runtime = TelemetryRuntime::start(source, config.refresh_interval())?;
    let mut view_rx = runtime.view_rx.clone();

    while running.load(Ordering::SeqCst) {
        if view_rx.has_changed().unwrap_or(false) {
            let view = view_rx.borrow_and_update().clone();
            println!("{}", format_status_line(&view));
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    runtime.shutdown();
    Ok(())
}
