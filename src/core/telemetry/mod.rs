//! Telemetry polling core.
//!
//! This module fetches snapshots from the rig's stats endpoint, turns each one
//! into a render plan, and applies it to a display surface. A failed cycle
//! collapses the display into the offline state.

mod numeric;
mod plan;
mod refresher;
mod renderer;
mod runtime;
mod snapshot;
mod source;
pub mod thresholds;
mod view;

pub use numeric::{ceil_celsius, parse_leading_integer, parse_leading_number};
pub use plan::{build_plan, RenderPlan, UpdateError};
pub use refresher::{CycleOutcome, RefreshError, StatsRefresher};
pub use renderer::{
    ClockReadout, Connectivity, DiskReadout, FanState, GpuReadout, ModelRow, ModelTable,
    Renderer, SystemReadout, ThermalReadout, Tone, Value, NO_MODELS_TEXT, OFFLINE_CLOCK_TEXT,
    STATUS_ACTIVE_TEXT, STATUS_UNAVAILABLE_TEXT,
};
pub use runtime::{run_refresh_loop, TelemetryRuntime};
pub use snapshot::{DiskStats, GpuStats, ModelRecord, SysStats, TelemetrySnapshot, ThermalStats};
pub use source::{FetchError, HttpSnapshotSource, SnapshotSource};
pub use thresholds::{evaluate_thermals, Alert, AlertCategory, AlertSeverity, ThermalPolicy};
pub use view::DashboardView;

/// Path of the stats endpoint on the telemetry server
pub const API_STATS_PATH: &str = "/api/stats";

/// Documented default refresh cadence
pub const DEFAULT_REFRESH_MS: u64 = 1000;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Processor string reported for a model fully resident on the GPU
pub const FULL_GPU_MARKER: &str = "100% GPU";
