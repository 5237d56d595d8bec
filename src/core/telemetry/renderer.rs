//! Display surface abstraction.
//!
//! The refresher never touches a concrete UI. It hands each logical field
//! group to a [`Renderer`], one method per group.

use serde::Serialize;

use super::thresholds::Alert;

/// Placeholder shown in the model table when nothing is loaded
pub const NO_MODELS_TEXT: &str = "No models currently loaded";

pub const STATUS_ACTIVE_TEXT: &str = "Telemetry: Active";
pub const STATUS_UNAVAILABLE_TEXT: &str = "Telemetry: Unavailable";
pub const STATUS_PENDING_TEXT: &str = "Telemetry: Connecting...";
pub const OFFLINE_CLOCK_TEXT: &str = "OFFLINE";

/// Semantic color of a displayed value. Concrete colors are up to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Tone {
    #[default]
    Normal,
    Dim,
    Accent,
    Success,
    Warning,
    Danger,
}

/// A display string with its tone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Value {
    pub text: String,
    pub tone: Tone,
}

impl Value {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Normal)
    }

    pub fn is_danger(&self) -> bool {
        self.tone == Tone::Danger
    }
}

/// State of the connectivity indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Connectivity {
    /// No cycle has completed yet
    #[default]
    Pending,
    Active,
    Unavailable,
}

impl Connectivity {
    pub fn status_text(&self) -> &'static str {
        match self {
            Connectivity::Pending => STATUS_PENDING_TEXT,
            Connectivity::Active => STATUS_ACTIVE_TEXT,
            Connectivity::Unavailable => STATUS_UNAVAILABLE_TEXT,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Connectivity::Pending => Tone::Dim,
            Connectivity::Active => Tone::Success,
            Connectivity::Unavailable => Tone::Danger,
        }
    }

    /// Tone of the frame around the clock
    pub fn frame_tone(&self) -> Tone {
        match self {
            Connectivity::Pending => Tone::Dim,
            Connectivity::Active => Tone::Accent,
            Connectivity::Unavailable => Tone::Danger,
        }
    }

    /// Whether the pulse dot is lit
    pub fn is_active(&self) -> bool {
        *self == Connectivity::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockReadout {
    pub time: Value,
}

impl ClockReadout {
    pub fn server(time: impl Into<String>) -> Self {
        Self {
            time: Value::new(time, Tone::Accent),
        }
    }

    pub fn offline() -> Self {
        Self {
            time: Value::new(OFFLINE_CLOCK_TEXT, Tone::Danger),
        }
    }
}

impl Default for ClockReadout {
    fn default() -> Self {
        Self {
            time: Value::new("--:--:--", Tone::Dim),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GpuReadout {
    pub util: String,
    pub temp: String,
    pub mem: String,
    pub power: String,
    pub fan: String,
}

impl Default for GpuReadout {
    fn default() -> Self {
        Self {
            util: "--".to_string(),
            temp: "--".to_string(),
            mem: "--".to_string(),
            power: "--".to_string(),
            fan: "--".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemReadout {
    pub load: String,
    /// `"<used> / <total>"`
    pub memory: String,
}

impl Default for SystemReadout {
    fn default() -> Self {
        Self {
            load: "--".to_string(),
            memory: "--".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FanState {
    #[default]
    Active,
    Idle,
}

impl FanState {
    pub fn badge_text(&self) -> &'static str {
        match self {
            FanState::Active => "Active",
            FanState::Idle => "Idle",
        }
    }

    pub fn badge_tone(&self) -> Tone {
        match self {
            FanState::Active => Tone::Success,
            FanState::Idle => Tone::Dim,
        }
    }
}

/// The thermal card: temperatures, pump, fan and the card highlight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalReadout {
    pub cpu: Value,
    pub cpu_badge: Value,
    pub ssd: Value,
    pub vrm: Value,
    pub pump: Value,
    pub fan: Value,
    pub fan_state: FanState,
    /// Attention outline on the card
    pub highlighted: bool,
    pub alerts: Vec<Alert>,
}

impl Default for ThermalReadout {
    fn default() -> Self {
        Self {
            cpu: Value::new("--", Tone::Dim),
            cpu_badge: Value::new("Normal", Tone::Dim),
            ssd: Value::new("--", Tone::Dim),
            vrm: Value::new("--", Tone::Dim),
            pump: Value::new("--", Tone::Dim),
            fan: Value::new("--", Tone::Dim),
            fan_state: FanState::default(),
            highlighted: false,
            alerts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskReadout {
    pub used: String,
    pub percent: String,
    /// `"<avail> of <size>"`
    pub available: String,
    pub storage: Option<String>,
    pub mount: Option<String>,
    /// Parsed usage percentage, for gauges
    pub usage_ratio: Option<f64>,
}

impl Default for DiskReadout {
    fn default() -> Self {
        Self {
            used: "--".to_string(),
            percent: "--".to_string(),
            available: "--".to_string(),
            storage: None,
            mount: None,
            usage_ratio: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRow {
    pub name: String,
    pub id: Option<String>,
    pub size: String,
    /// Processor badge, success tone when fully GPU resident
    pub processor: Value,
    pub until: String,
}

/// Model inventory table, rebuilt wholesale every cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum ModelTable {
    /// Single placeholder row
    #[default]
    Empty,
    Rows(Vec<ModelRow>),
}

impl ModelTable {
    /// Number of table rows as drawn, counting the placeholder.
    pub fn row_count(&self) -> usize {
        match self {
            ModelTable::Empty => 1,
            ModelTable::Rows(rows) => rows.len(),
        }
    }
}

/// Capability the refresher writes into. Implementations must not read back
/// from the display to decide what to write.
pub trait Renderer {
    fn set_connectivity(&mut self, state: Connectivity);
    fn set_clock(&mut self, clock: &ClockReadout);
    fn set_gpu(&mut self, gpu: &GpuReadout);
    fn set_system(&mut self, system: &SystemReadout);
    fn set_thermals(&mut self, thermals: &ThermalReadout);
    fn set_disk(&mut self, disk: &DiskReadout);
    fn set_models(&mut self, models: &ModelTable);

    /// Switch indicator and clock to the offline state.
    fn show_offline(&mut self) {
        self.set_connectivity(Connectivity::Unavailable);
        self.set_clock(&ClockReadout::offline());
    }
}
