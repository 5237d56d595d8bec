//! Tokio runtime and scheduler for the refresh loop.
//!
//! The schedule is an owned object: start it, read views from its watch
//! channel, shut it down when done.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time::{interval, MissedTickBehavior};

use super::refresher::StatsRefresher;
use super::source::SnapshotSource;
use super::view::DashboardView;
use crate::error::{Result, RigmonError};

/// Owns the background runtime that drives the refresh loop.
pub struct TelemetryRuntime {
    /// Receiver for the view published after every cycle
    pub view_rx: watch::Receiver<Arc<DashboardView>>,

    /// Shutdown signal sender
    shutdown_tx: broadcast::Sender<()>,

    /// Handle to the runtime (for shutdown)
    runtime: tokio::runtime::Runtime,
}

impl TelemetryRuntime {
    /// Build the runtime and start polling `source` every `period`.
    pub fn start<S>(source: S, period: Duration) -> Result<Self>
    where
        S: SnapshotSource + Send + Sync + 'static,
    {
        if period.is_zero() {
            return Err(RigmonError::runtime("refresh interval must be non-zero"));
        }

        log::info!(
            "Starting telemetry polling of {} every {}ms",
            source.describe(),
            period.as_millis()
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("telemetry-worker")
            .build()
            .map_err(|e| RigmonError::runtime(format!("failed to build runtime: {}", e)))?;

        let (view_tx, view_rx) = watch::channel(Arc::new(DashboardView::new()));
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        let refresher = StatsRefresher::new(source, DashboardView::new());
        let shutdown_rx = shutdown_tx.subscribe();
        runtime.spawn(async move {
            run_refresh_loop(refresher, period, view_tx, shutdown_rx).await;
        });

        Ok(Self {
            view_rx,
            shutdown_tx,
            runtime,
        })
    }

    /// Most recently published view.
    pub fn latest(&self) -> Arc<DashboardView> {
        self.view_rx.borrow().clone()
    }

    /// Stop the loop and tear the runtime down.
    pub fn shutdown(self) {
        log::info!("Stopping telemetry polling");
        let _ = self.shutdown_tx.send(());
        self.runtime.shutdown_timeout(Duration::from_millis(500));
    }
}

/// Refresh on every tick until shutdown, publishing the view after each cycle.
///
/// Cycles never overlap: the next tick is only awaited once the current cycle
/// finished, and ticks missed meanwhile are skipped. A shutdown signal is
/// honored between cycles. Returns the refresher so callers can inspect it.
pub async fn run_refresh_loop<S>(
    mut refresher: StatsRefresher<S, DashboardView>,
    period: Duration,
    view_tx: watch::Sender<Arc<DashboardView>>,
    mut shutdown: broadcast::Receiver<()>,
) -> StatsRefresher<S, DashboardView>
where
    S: SnapshotSource,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            _ = shutdown.recv() => {
                log::debug!("Refresh loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                let outcome = refresher.refresh().await;
                log::debug!("Cycle {} finished: {:?}", refresher.cycles(), outcome);

                if view_tx.send(Arc::new(refresher.renderer().clone())).is_err() {
                    log::debug!("No view receivers left, stopping refresh loop");
                    break;
                }
            }
        }
    }

    refresher
}
