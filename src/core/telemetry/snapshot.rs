//! Wire types for one `/api/stats` payload.

use serde::{Deserialize, Serialize};

/// One telemetry payload, decoded fresh on every poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_time: Option<String>,
    pub nvidia: GpuStats,
    pub sys: SysStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temps: Option<ThermalStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<DiskStats>,
    pub ollama: Vec<ModelRecord>,
}

/// GPU readings as reported by nvidia-smi on the server.
///
/// When `error` is set the other fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub util: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem_total: Option<String>,
}

/// Sensor readings. Values are numeric strings that may carry a unit suffix
/// (`"45.5°C"`, `"1200 RPM"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermalStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_temp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssd_temp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vrm_temp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_fan_1: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskStats {
    pub used: String,
    pub percent: String,
    pub avail: String,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount: Option<String>,
}

/// One loaded inference model and its residency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub size: String,
    pub processor: String,
    pub until: String,
}
