use std::time::Duration;

use rigmon::core::telemetry::{FetchError, HttpSnapshotSource, SnapshotSource};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one HTTP response on a random local port, return the base URL
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}

fn source(base_url: &str) -> HttpSnapshotSource {
    HttpSnapshotSource::new(base_url, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_fetch_decodes_snapshot() {
    let base = serve_once(
        "200 OK",
        r#"{"server_time": "Mon, Jan 26, 2026 09:00:00 AM",
            "nvidia": {"error": "nvidia-smi not found"},
            "sys": {"load": "0.3", "mem_used": "2G", "mem_total": "16G"},
            "ollama": []}"#,
    )
    .await;

    let snapshot = source(&base).fetch().await.unwrap();
    assert_eq!(
        snapshot.server_time.as_deref(),
        Some("Mon, Jan 26, 2026 09:00:00 AM")
    );
    assert!(snapshot.nvidia.error.is_some());
    assert!(snapshot.ollama.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let base = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#).await;

    let result = source(&base).fetch().await;
    assert_eq!(result, Err(FetchError::Status(500)));
}

#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let base = serve_once("200 OK", "<html>not json</html>").await;

    let result = source(&base).fetch().await;
    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = source(&format!("http://127.0.0.1:{}", port)).fetch().await;
    assert!(matches!(result, Err(FetchError::Transport(_))));
}
