//! One-shot fetch of the telemetry endpoint.

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::telemetry::{
    CycleOutcome, DashboardView, HttpSnapshotSource, SnapshotSource, StatsRefresher,
};
use crate::error::RigmonError;
use crate::ui::print_view;

/// Execute the snapshot command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::effective_config(matches)?;
    let source = HttpSnapshotSource::new(&config.base_url, config.request_timeout())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    if matches.get_flag("json") {
        let snapshot = runtime
            .block_on(source.fetch())
            .map_err(|e| RigmonError::telemetry_unavailable(e.to_string()))?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let url = source.url().to_string();
    let mut refresher = StatsRefresher::new(source, DashboardView::new());
    let outcome = runtime.block_on(refresher.refresh());

    print_view(refresher.renderer());

    match outcome {
        CycleOutcome::Online => Ok(()),
        CycleOutcome::Offline(e) => {
            Err(RigmonError::telemetry_unavailable(format!("{}: {}", url, e)).into())
        }
    }
}
