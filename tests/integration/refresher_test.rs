use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use rigmon::core::telemetry::{
    Connectivity, CycleOutcome, DashboardView, FanState, FetchError, ModelTable, RefreshError,
    SnapshotSource, StatsRefresher, TelemetrySnapshot, Tone, UpdateError, NO_MODELS_TEXT,
    OFFLINE_CLOCK_TEXT, STATUS_UNAVAILABLE_TEXT,
};
use serde_json::json;

/// Replays a fixed list of fetch results, one per cycle
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<TelemetrySnapshot, FetchError>>>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<TelemetrySnapshot, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

impl SnapshotSource for ScriptedSource {
    fn fetch(&self) -> impl Future<Output = Result<TelemetrySnapshot, FetchError>> + Send {
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_string())));
        async move { next }
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

fn snapshot(value: serde_json::Value) -> TelemetrySnapshot {
    serde_json::from_value(value).unwrap()
}

/// The reference payload: hot CPU, idle fan, no models
fn hot_cpu_snapshot() -> TelemetrySnapshot {
    snapshot(json!({
        "server_time": "Sun, Jan 25, 2026 10:56:42 AM",
        "nvidia": {"util": "40%", "temp": "65", "mem": "4/8GB", "power": "120W", "fan": "30%"},
        "sys": {"load": "0.5", "mem_used": "8G", "mem_total": "32G"},
        "temps": {"cpu_temp": "81.2", "ssd_temp": "50", "vrm_temp": "60",
                  "pump_speed": "600", "sys_fan_1": "0"},
        "disk": {"used": "100G", "percent": "50%", "avail": "100G", "size": "200G"},
        "ollama": []
    }))
}

fn cool_snapshot() -> TelemetrySnapshot {
    snapshot(json!({
        "server_time": "Sun, Jan 25, 2026 11:00:00 AM",
        "nvidia": {"util": "5%", "temp": "40°C", "mem": "512 MiB", "power": "30W", "fan": "0%"},
        "sys": {"load": "0.1", "mem_used": "4G", "mem_total": "32G"},
        "temps": {"cpu_temp": "45.0°C", "ssd_temp": "38°C", "vrm_temp": "50°C",
                  "pump_speed": "1800 RPM", "sys_fan_1": "950 RPM"},
        "disk": {"used": "120G", "percent": "60%", "avail": "80G", "size": "200G"},
        "ollama": [
            {"name": "llama3:8b", "id": "365c0bd3c000", "size": "6.7 GB",
             "processor": "100% GPU", "until": "4 minutes from now"},
            {"name": "mixtral:8x7b", "size": "28 GB",
             "processor": "38%/62% CPU/GPU", "until": "Forever"}
        ]
    }))
}

fn refresher(
    responses: Vec<Result<TelemetrySnapshot, FetchError>>,
) -> StatsRefresher<ScriptedSource, DashboardView> {
    StatsRefresher::new(ScriptedSource::new(responses), DashboardView::new())
}

#[tokio::test]
async fn test_hot_cpu_scenario() {
    let mut refresher = refresher(vec![Ok(hot_cpu_snapshot())]);

    assert_eq!(refresher.refresh().await, CycleOutcome::Online);

    let view = refresher.renderer();
    assert_eq!(view.connectivity, Connectivity::Active);
    assert_eq!(view.clock.time.text, "Sun, Jan 25, 2026 10:56:42 AM");
    assert_eq!(view.thermals.cpu.text, "82°C");
    assert_eq!(view.thermals.cpu.tone, Tone::Danger);
    assert_eq!(view.thermals.cpu_badge.text, "High");
    assert!(view.thermals.highlighted);
    assert_eq!(view.thermals.fan_state, FanState::Idle);
    assert_eq!(view.thermals.fan.text, "");
    assert_eq!(view.models, ModelTable::Empty);
    assert_eq!(view.models.row_count(), 1);
    assert_eq!(view.system.memory, "8G / 32G");
    assert_eq!(view.disk.available, "100G of 200G");
}

#[tokio::test]
async fn test_fetch_failure_goes_offline() {
    let mut refresher = refresher(vec![Err(FetchError::Transport(
        "connection refused".to_string(),
    ))]);

    let outcome = refresher.refresh().await;
    assert!(matches!(
        outcome,
        CycleOutcome::Offline(RefreshError::Fetch(FetchError::Transport(_)))
    ));

    let view = refresher.renderer();
    assert_eq!(view.connectivity, Connectivity::Unavailable);
    assert!(!view.connectivity.is_active());
    assert_eq!(view.connectivity.status_text(), STATUS_UNAVAILABLE_TEXT);
    assert_eq!(view.clock.time.text, OFFLINE_CLOCK_TEXT);
    assert_eq!(view.clock.time.tone, Tone::Danger);
}

#[tokio::test]
async fn test_status_and_decode_failures_are_offline() {
    let mut refresher = refresher(vec![
        Err(FetchError::Status(500)),
        Err(FetchError::Decode("expected value".to_string())),
    ]);

    assert!(!refresher.refresh().await.is_online());
    assert!(!refresher.refresh().await.is_online());
    assert_eq!(refresher.consecutive_failures(), 2);
    assert_eq!(refresher.renderer().clock.time.text, OFFLINE_CLOCK_TEXT);
}

#[tokio::test]
async fn test_update_failure_applies_nothing() {
    let mut broken = cool_snapshot();
    broken.nvidia.power = None;
    broken.sys.load = Some("9.9".to_string());

    let mut refresher = refresher(vec![Ok(cool_snapshot()), Ok(broken)]);
    refresher.refresh().await;
    let before = refresher.renderer().clone();

    let outcome = refresher.refresh().await;
    assert_eq!(
        outcome,
        CycleOutcome::Offline(RefreshError::Update(UpdateError::MissingField(
            "nvidia.power"
        )))
    );

    let view = refresher.renderer();
    assert_eq!(view.connectivity, Connectivity::Unavailable);
    assert_eq!(view.system, before.system);
    assert_eq!(view.gpu, before.gpu);
    assert_eq!(view.thermals, before.thermals);
    assert_eq!(view.models, before.models);
}

#[tokio::test]
async fn test_gpu_error_keeps_previous_gpu_fields() {
    let mut gpu_down = hot_cpu_snapshot();
    gpu_down.nvidia = serde_json::from_value(json!({"error": "nvidia-smi failed"})).unwrap();

    let mut refresher = refresher(vec![Ok(cool_snapshot()), Ok(gpu_down)]);
    refresher.refresh().await;
    let before = refresher.renderer().gpu.clone();

    assert!(refresher.refresh().await.is_online());
    assert_eq!(refresher.renderer().gpu, before);
    assert_eq!(refresher.renderer().gpu.util, "5%");
    // Other groups still follow the new snapshot
    assert_eq!(refresher.renderer().system.load, "0.5");
}

#[tokio::test]
async fn test_rerendering_same_snapshot_is_idempotent() {
    let mut refresher = refresher(vec![Ok(cool_snapshot()), Ok(cool_snapshot())]);

    refresher.refresh().await;
    let first = refresher.renderer().clone();
    refresher.refresh().await;
    let second = refresher.renderer();

    assert_eq!(first.connectivity, second.connectivity);
    assert_eq!(first.clock, second.clock);
    assert_eq!(first.gpu, second.gpu);
    assert_eq!(first.system, second.system);
    assert_eq!(first.thermals, second.thermals);
    assert_eq!(first.disk, second.disk);
    assert_eq!(first.models, second.models);
}

#[tokio::test]
async fn test_model_rows_in_input_order() {
    let mut refresher = refresher(vec![Ok(cool_snapshot())]);
    refresher.refresh().await;

    let ModelTable::Rows(rows) = &refresher.renderer().models else {
        panic!("expected model rows, got placeholder '{}'", NO_MODELS_TEXT);
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "llama3:8b");
    assert_eq!(rows[0].id.as_deref(), Some("365c0bd3c000"));
    assert_eq!(rows[0].processor.tone, Tone::Success);
    assert_eq!(rows[1].name, "mixtral:8x7b");
    assert_eq!(rows[1].processor.tone, Tone::Warning);
}

#[tokio::test]
async fn test_recovers_after_outage() {
    let mut refresher = refresher(vec![
        Ok(cool_snapshot()),
        Err(FetchError::Status(502)),
        Ok(hot_cpu_snapshot()),
    ]);

    refresher.refresh().await;
    refresher.refresh().await;
    assert_eq!(refresher.renderer().clock.time.text, OFFLINE_CLOCK_TEXT);

    assert!(refresher.refresh().await.is_online());
    let view = refresher.renderer();
    assert_eq!(view.connectivity, Connectivity::Active);
    assert_eq!(view.clock.time.text, "Sun, Jan 25, 2026 10:56:42 AM");
    assert_eq!(view.clock.time.tone, Tone::Accent);
    assert_eq!(refresher.consecutive_failures(), 0);
    assert_eq!(refresher.cycles(), 3);
}

#[tokio::test]
async fn test_highlight_clears_when_cool_again() {
    let mut refresher = refresher(vec![Ok(hot_cpu_snapshot()), Ok(cool_snapshot())]);

    refresher.refresh().await;
    assert!(refresher.renderer().thermals.highlighted);

    refresher.refresh().await;
    let thermals = &refresher.renderer().thermals;
    assert!(!thermals.highlighted);
    assert_eq!(thermals.cpu_badge.text, "Normal");
    assert_eq!(thermals.fan_state, FanState::Active);
    assert_eq!(thermals.fan.text, "950 RPM");
    assert!(thermals.alerts.is_empty());
}

#[tokio::test]
async fn test_absent_temps_and_disk_keep_previous_groups() {
    let mut partial = hot_cpu_snapshot();
    partial.temps = None;
    partial.disk = None;

    let mut refresher = refresher(vec![Ok(cool_snapshot()), Ok(partial)]);
    refresher.refresh().await;
    let before = refresher.renderer().clone();

    assert!(refresher.refresh().await.is_online());
    let view = refresher.renderer();
    assert_eq!(view.thermals, before.thermals);
    assert_eq!(view.disk, before.disk);
    assert_eq!(view.disk.available, "80G of 200G");
    // Groups present in the snapshot still update
    assert_eq!(view.system.load, "0.5");
    assert_eq!(view.system.memory, "8G / 32G");
    assert_eq!(view.models, ModelTable::Empty);
}
