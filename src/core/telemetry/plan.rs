//! Turning a snapshot into a display update.
//!
//! A plan is built completely before anything is written, so a snapshot that
//! fails halfway leaves the display untouched.

use thiserror::Error;

use super::numeric::parse_leading_number;
use super::renderer::{
    ClockReadout, Connectivity, DiskReadout, GpuReadout, ModelRow, ModelTable, Renderer,
    SystemReadout, ThermalReadout, Tone, Value,
};
use super::snapshot::{DiskStats, GpuStats, ModelRecord, SysStats, TelemetrySnapshot};
use super::thresholds::{evaluate_thermals, ThermalPolicy};
use super::FULL_GPU_MARKER;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("snapshot is missing field '{0}'")]
    MissingField(&'static str),
}

/// Everything one successful cycle writes. `None` groups are left as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub clock: Option<ClockReadout>,
    pub gpu: Option<GpuReadout>,
    pub system: SystemReadout,
    pub thermals: Option<ThermalReadout>,
    pub disk: Option<DiskReadout>,
    pub models: ModelTable,
}

impl RenderPlan {
    /// Write the plan in display order: connectivity, clock, GPU, system,
    /// thermals, disk, models.
    pub fn apply<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.set_connectivity(Connectivity::Active);

        if let Some(clock) = &self.clock {
            renderer.set_clock(clock);
        }
        if let Some(gpu) = &self.gpu {
            renderer.set_gpu(gpu);
        }
        renderer.set_system(&self.system);
        if let Some(thermals) = &self.thermals {
            renderer.set_thermals(thermals);
        }
        if let Some(disk) = &self.disk {
            renderer.set_disk(disk);
        }
        renderer.set_models(&self.models);
    }
}

pub fn build_plan(
    snapshot: &TelemetrySnapshot,
    policy: &ThermalPolicy,
) -> Result<RenderPlan, UpdateError> {
    Ok(RenderPlan {
        clock: snapshot.server_time.as_deref().map(ClockReadout::server),
        gpu: gpu_readout(&snapshot.nvidia)?,
        system: system_readout(&snapshot.sys)?,
        thermals: snapshot
            .temps
            .as_ref()
            .map(|temps| evaluate_thermals(temps, policy)),
        disk: snapshot.disk.as_ref().map(disk_readout),
        models: model_table(&snapshot.ollama),
    })
}

/// `None` when the server flagged a GPU error.
fn gpu_readout(gpu: &GpuStats) -> Result<Option<GpuReadout>, UpdateError> {
    if gpu.error.is_some() {
        return Ok(None);
    }

    Ok(Some(GpuReadout {
        util: required(&gpu.util, "nvidia.util")?,
        temp: required(&gpu.temp, "nvidia.temp")?,
        mem: required(&gpu.mem, "nvidia.mem")?,
        power: required(&gpu.power, "nvidia.power")?,
        fan: required(&gpu.fan, "nvidia.fan")?,
    }))
}

fn system_readout(sys: &SysStats) -> Result<SystemReadout, UpdateError> {
    if sys.error.is_some() {
        return Ok(SystemReadout {
            load: "N/A".to_string(),
            memory: "N/A".to_string(),
        });
    }

    let used = required(&sys.mem_used, "sys.mem_used")?;
    let total = required(&sys.mem_total, "sys.mem_total")?;

    Ok(SystemReadout {
        load: required(&sys.load, "sys.load")?,
        memory: format!("{} / {}", used, total),
    })
}

fn disk_readout(disk: &DiskStats) -> DiskReadout {
    DiskReadout {
        used: disk.used.clone(),
        percent: disk.percent.clone(),
        available: format!("{} of {}", disk.avail, disk.size),
        storage: disk.storage.clone(),
        mount: disk.mount.clone(),
        usage_ratio: parse_leading_number(&disk.percent).map(|p| (p / 100.0).clamp(0.0, 1.0)),
    }
}

fn model_table(models: &[ModelRecord]) -> ModelTable {
    if models.is_empty() {
        return ModelTable::Empty;
    }

    ModelTable::Rows(
        models
            .iter()
            .map(|model| {
                let tone = if model.processor == FULL_GPU_MARKER {
                    Tone::Success
                } else {
                    Tone::Warning
                };
                ModelRow {
                    name: model.name.clone(),
                    id: model.id.clone(),
                    size: model.size.clone(),
                    processor: Value::new(model.processor.clone(), tone),
                    until: model.until.clone(),
                }
            })
            .collect(),
    )
}

fn required(field: &Option<String>, name: &'static str) -> Result<String, UpdateError> {
    field.clone().ok_or(UpdateError::MissingField(name))
}
