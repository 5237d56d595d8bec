use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rigmon::core::telemetry::{
    run_refresh_loop, DashboardView, FetchError, SnapshotSource, StatsRefresher,
    TelemetrySnapshot,
};
use serde_json::json;
use tokio::sync::{broadcast, watch};

/// Source whose fetch takes longer than the refresh interval
#[derive(Clone)]
struct SlowSource {
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    fetches: Arc<AtomicUsize>,
}

impl SlowSource {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl SnapshotSource for SlowSource {
    fn fetch(&self) -> impl Future<Output = Result<TelemetrySnapshot, FetchError>> + Send {
        let source = self.clone();
        async move {
            let now = source.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            source.max_in_flight.fetch_max(now, Ordering::SeqCst);
            source.fetches.fetch_add(1, Ordering::SeqCst);

            tokio::time::sleep(source.delay).await;

            source.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(serde_json::from_value(json!({
                "nvidia": {"error": "no gpu"},
                "sys": {"load": "0.2", "mem_used": "1G", "mem_total": "8G"},
                "ollama": []
            }))
            .unwrap())
        }
    }

    fn describe(&self) -> String {
        "slow".to_string()
    }
}

#[tokio::test]
async fn test_slow_cycles_never_overlap() {
    let source = SlowSource::new(Duration::from_millis(30));
    let probe = source.clone();

    let (view_tx, view_rx) = watch::channel(Arc::new(DashboardView::new()));
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let handle = tokio::spawn(run_refresh_loop(
        StatsRefresher::new(source, DashboardView::new()),
        Duration::from_millis(10),
        view_tx,
        shutdown_rx,
    ));

    tokio::time::sleep(Duration::from_millis(250)).await;
    shutdown_tx.send(()).unwrap();
    let refresher = handle.await.unwrap();

    assert!(refresher.cycles() >= 2);
    assert_eq!(probe.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(
        probe.fetches.load(Ordering::SeqCst) as u64,
        refresher.cycles()
    );
    assert!(view_rx.borrow().connectivity.is_active());
}

#[tokio::test]
async fn test_loop_stops_when_view_receivers_are_gone() {
    let source = SlowSource::new(Duration::from_millis(1));

    let (view_tx, view_rx) = watch::channel(Arc::new(DashboardView::new()));
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
    drop(view_rx);

    let refresher = tokio::time::timeout(
        Duration::from_secs(2),
        run_refresh_loop(
            StatsRefresher::new(source, DashboardView::new()),
            Duration::from_millis(5),
            view_tx,
            shutdown_rx,
        ),
    )
    .await
    .expect("loop should stop on its own");

    assert_eq!(refresher.cycles(), 1);
}

#[test]
fn test_runtime_publishes_offline_view_for_unreachable_endpoint() {
    use rigmon::core::telemetry::{Connectivity, HttpSnapshotSource, TelemetryRuntime};

    // Bind then drop a listener to get a port nobody is serving
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let source = HttpSnapshotSource::new(
        &format!("http://127.0.0.1:{}", port),
        Duration::from_millis(500),
    )
    .unwrap();
    let runtime = TelemetryRuntime::start(source, Duration::from_millis(100)).unwrap();

    let mut offline = false;
    for _ in 0..40 {
        if runtime.latest().connectivity == Connectivity::Unavailable {
            offline = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    runtime.shutdown();
    assert!(offline);
}

#[test]
fn test_runtime_rejects_zero_period() {
    use rigmon::core::telemetry::{HttpSnapshotSource, TelemetryRuntime};

    let source =
        HttpSnapshotSource::new("http://127.0.0.1:5000", Duration::from_millis(500)).unwrap();
    assert!(TelemetryRuntime::start(source, Duration::ZERO).is_err());
}
