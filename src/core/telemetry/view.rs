use chrono::{DateTime, Local};
use serde::Serialize;

use super::renderer::{
    ClockReadout, Connectivity, DiskReadout, GpuReadout, ModelTable, Renderer, SystemReadout,
    ThermalReadout,
};
use super::thresholds::Alert;

/// In-memory display surface the dashboard draws from.
///
/// Each field group keeps its last written value until a cycle overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub connectivity: Connectivity,
    pub clock: ClockReadout,
    pub gpu: GpuReadout,
    pub system: SystemReadout,
    pub thermals: ThermalReadout,
    pub disk: DiskReadout,
    pub models: ModelTable,
    /// Local time of the last cycle that reached the endpoint
    #[serde(skip)]
    pub last_online: Option<DateTime<Local>>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts raised by the last thermal update, while online.
    pub fn active_alerts(&self) -> &[Alert] {
        if self.connectivity.is_active() {
            &self.thermals.alerts
        } else {
            &[]
        }
    }
}

impl Renderer for DashboardView {
    fn set_connectivity(&mut self, state: Connectivity) {
        if state.is_active() {
            self.last_online = Some(Local::now());
        }
        self.connectivity = state;
    }

    fn set_clock(&mut self, clock: &ClockReadout) {
        self.clock = clock.clone();
    }

    fn set_gpu(&mut self, gpu: &GpuReadout) {
        self.gpu = gpu.clone();
    }

    fn set_system(&mut self, system: &SystemReadout) {
        self.system = system.clone();
    }

    fn set_thermals(&mut self, thermals: &ThermalReadout) {
        self.thermals = thermals.clone();
    }

    fn set_disk(&mut self, disk: &DiskReadout) {
        self.disk = disk.clone();
    }

    fn set_models(&mut self, models: &ModelTable) {
        self.models = models.clone();
    }
}
