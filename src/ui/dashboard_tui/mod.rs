//! Terminal dashboard for the telemetry endpoint.
//!
//! Provides a live view using ratatui, fed by the background refresh loop.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_dashboard_app, DashboardApp, DashboardAppConfig};
pub use event_handler::DashboardEvent;
