//! Threshold policy for the thermal card.
//!
//! Evaluates sensor readings against fixed danger thresholds and produces the
//! styled thermal readout together with the alerts for the banner.

use serde::{Deserialize, Serialize};

use super::numeric::{ceil_celsius, parse_leading_integer};
use super::renderer::{FanState, ThermalReadout, Tone, Value};
use super::snapshot::ThermalStats;

/// Danger thresholds. Temperatures are compared after rounding up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalPolicy {
    pub cpu_max_celsius: i64, // danger above
    pub ssd_max_celsius: i64, // danger above
    pub vrm_max_celsius: i64, // danger above
    pub pump_min_rpm: i64,    // danger below
}

impl Default for ThermalPolicy {
    fn default() -> Self {
        Self {
            cpu_max_celsius: 80,
            ssd_max_celsius: 70,
            vrm_max_celsius: 90,
            pump_min_rpm: 500,
        }
    }
}

/// An individual alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub category: AlertCategory,
    pub message: String,
    pub value: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCategory {
    CpuTemperature,
    SsdTemperature,
    VrmTemperature,
    Pump,
}

impl AlertCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AlertCategory::CpuTemperature => "CPU",
            AlertCategory::SsdTemperature => "SSD",
            AlertCategory::VrmTemperature => "VRM",
            AlertCategory::Pump => "AIO pump",
        }
    }
}

/// Evaluate the sensor block and build the thermal card.
///
/// The card is highlighted iff at least one CPU, SSD, VRM or pump danger
/// condition holds.
pub fn evaluate_thermals(stats: &ThermalStats, policy: &ThermalPolicy) -> ThermalReadout {
    let mut alerts = Vec::new();

    let (cpu, cpu_hot) = temperature_value(
        stats.cpu_temp.as_deref(),
        policy.cpu_max_celsius,
        AlertCategory::CpuTemperature,
        &mut alerts,
    );
    let cpu_badge = if cpu_hot {
        Value::new("High", Tone::Danger)
    } else {
        Value::new("Normal", Tone::Dim)
    };

    let (ssd, _) = temperature_value(
        stats.ssd_temp.as_deref(),
        policy.ssd_max_celsius,
        AlertCategory::SsdTemperature,
        &mut alerts,
    );
    let (vrm, _) = temperature_value(
        stats.vrm_temp.as_deref(),
        policy.vrm_max_celsius,
        AlertCategory::VrmTemperature,
        &mut alerts,
    );

    let pump = pump_value(stats.pump_speed.as_deref(), policy.pump_min_rpm, &mut alerts);
    let (fan, fan_state) = fan_value(stats.sys_fan_1.as_deref());

    ThermalReadout {
        highlighted: !alerts.is_empty(),
        cpu,
        cpu_badge,
        ssd,
        vrm,
        pump,
        fan,
        fan_state,
        alerts,
    }
}

fn temperature_value(
    raw: Option<&str>,
    max_celsius: i64,
    category: AlertCategory,
    alerts: &mut Vec<Alert>,
) -> (Value, bool) {
    let Some(celsius) = raw.and_then(ceil_celsius) else {
        return (Value::normal("N/A"), false);
    };

    let text = format!("{}°C", celsius);
    if celsius > max_celsius {
        alerts.push(Alert {
            severity: AlertSeverity::Critical,
            category,
            message: format!(
                "{} temperature at {}°C (danger above {}°C)",
                category.label(),
                celsius,
                max_celsius
            ),
            value: celsius as f64,
            threshold: max_celsius as f64,
        });
        (Value::new(text, Tone::Danger), true)
    } else {
        (Value::normal(text), false)
    }
}

fn pump_value(raw: Option<&str>, min_rpm: i64, alerts: &mut Vec<Alert>) -> Value {
    let Some(raw) = raw else {
        return Value::normal("N/A");
    };

    match parse_leading_integer(raw) {
        Some(rpm) if rpm < min_rpm => {
            alerts.push(Alert {
                severity: AlertSeverity::Warning,
                category: AlertCategory::Pump,
                message: format!("AIO pump at {} (danger below {})", raw, min_rpm),
                value: rpm as f64,
                threshold: min_rpm as f64,
            });
            Value::new(format!("⚠️ Low {}", raw), Tone::Danger)
        }
        _ => Value::normal(raw),
    }
}

fn fan_value(raw: Option<&str>) -> (Value, FanState) {
    let raw = raw.unwrap_or("N/A");
    if parse_leading_integer(raw) == Some(0) {
        (Value::new("", Tone::Dim), FanState::Idle)
    } else {
        (Value::new(raw, Tone::Success), FanState::Active)
    }
}
