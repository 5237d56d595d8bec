use thiserror::Error;

use super::plan::{build_plan, RenderPlan, UpdateError};
use super::renderer::Renderer;
use super::source::{FetchError, SnapshotSource};
use super::thresholds::ThermalPolicy;

/// Anything that can sink a refresh cycle. All kinds are handled the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("update failed: {0}")]
    Update(#[from] UpdateError),
}

/// Result of one refresh cycle. Only used for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Online,
    Offline(RefreshError),
}

impl CycleOutcome {
    pub fn is_online(&self) -> bool {
        matches!(self, CycleOutcome::Online)
    }
}

/// Fetches one snapshot per call and reconciles it into the renderer.
pub struct StatsRefresher<S, R> {
    source: S,
    renderer: R,
    policy: ThermalPolicy,
    cycles: u64,
    consecutive_failures: u64,
}

impl<S, R> StatsRefresher<S, R>
where
    S: SnapshotSource,
    R: Renderer,
{
    pub fn new(source: S, renderer: R) -> Self {
        Self {
            source,
            renderer,
            policy: ThermalPolicy::default(),
            cycles: 0,
            consecutive_failures: 0,
        }
    }

    pub fn with_policy(mut self, policy: ThermalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run one cycle: fetch, decode, plan, apply.
    ///
    /// On any failure the renderer is switched offline and nothing else from
    /// this cycle is written. Errors never escape the cycle.
    pub async fn refresh(&mut self) -> CycleOutcome {
        self.cycles += 1;

        match self.prepare().await {
            Ok(plan) => {
                plan.apply(&mut self.renderer);
                if self.consecutive_failures > 0 {
                    log::info!(
                        "Telemetry from {} available again after {} failed cycle(s)",
                        self.source.describe(),
                        self.consecutive_failures
                    );
                }
                self.consecutive_failures = 0;
                CycleOutcome::Online
            }
            Err(e) => {
                self.consecutive_failures += 1;
                log::warn!(
                    "Error fetching stats from {}: {}",
                    self.source.describe(),
                    e
                );
                self.renderer.show_offline();
                CycleOutcome::Offline(e)
            }
        }
    }

    async fn prepare(&self) -> Result<RenderPlan, RefreshError> {
        let snapshot = self.source.fetch().await?;
        log::trace!("Snapshot received: {} model(s)", snapshot.ollama.len());
        Ok(build_plan(&snapshot, &self.policy)?)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of cycles started so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn consecutive_failures(&self) -> u64 {
        self.consecutive_failures
    }
}
