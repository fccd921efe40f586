//! Integration tests for the download engine against a local HTTP server.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use futures_util::stream;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use url::Url;

use gecko_download::{
    DownloadEngine, DownloadEnginePort, DownloadError, DownloadSnapshot, ProgressSink, TransferId,
    TransferRequest,
};

const PAYLOAD_LEN: usize = 256 * 1024;

fn payload() -> Vec<u8> {
    (0..PAYLOAD_LEN).map(|i| (i % 251) as u8).collect()
}

async fn stalled() -> Response {
    let first = stream::once(async { Ok::<_, std::io::Error>(Bytes::from_static(&[7u8; 1024])) });
    let body = Body::from_stream(futures_util::StreamExt::chain(first, stream::pending()));
    ([(header::CONTENT_LENGTH, "1048576")], body).into_response()
}

/// Sends one chunk of a larger declared body, then fails the stream.
async fn truncated() -> Response {
    let first = stream::once(async { Ok::<_, std::io::Error>(Bytes::from_static(&[7u8; 1024])) });
    let failure = stream::once(async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Err::<Bytes, _>(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "upstream dropped",
        ))
    });
    let body = Body::from_stream(futures_util::StreamExt::chain(first, failure));
    ([(header::CONTENT_LENGTH, "1048576")], body).into_response()
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/drivers/592.00-desktop.exe", get(|| async { payload() }))
        .route("/drivers/empty.exe", get(|| async { Vec::<u8>::new() }))
        .route("/drivers/missing.exe", get(|| async { StatusCode::NOT_FOUND }))
        .route("/drivers/stalled.exe", get(stalled))
        .route("/drivers/truncated.exe", get(truncated));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn url(addr: SocketAddr, path: &str) -> Url {
    Url::parse(&format!("http://{addr}{path}")).unwrap()
}

/// Sink that records every snapshot.
fn recording_sink() -> (ProgressSink, Arc<Mutex<Vec<DownloadSnapshot>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let handle = Arc::clone(&seen);
    let sink: ProgressSink = Arc::new(move |snapshot| handle.lock().unwrap().push(snapshot));
    (sink, seen)
}

/// Sink that signals the first snapshot over a channel.
fn signalling_sink() -> (ProgressSink, mpsc::UnboundedReceiver<DownloadSnapshot>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink: ProgressSink = Arc::new(move |snapshot| {
        let _ = tx.send(snapshot);
    });
    (sink, rx)
}

#[tokio::test]
async fn fixed_payload_completes_with_final_snapshot() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let engine = DownloadEngine::new().unwrap();
    let request = TransferRequest::new(url(addr, "/drivers/592.00-desktop.exe"), dir.path());
    let id = request.id.clone();
    let (sink, seen) = recording_sink();

    let path = engine.download(request, sink).await.unwrap();

    assert_eq!(path, dir.path().join("592.00-desktop.exe"));
    assert_eq!(std::fs::read(&path).unwrap(), payload());

    let seen = seen.lock().unwrap();
    let last = seen.last().expect("at least one snapshot");
    assert_eq!(last.bytes_written, PAYLOAD_LEN as u64);
    assert_eq!(last.total_bytes, PAYLOAD_LEN as u64);
    assert!(last.is_complete());
    assert!(seen.iter().all(|s| s.identifier.as_ref() == Some(&id)));
    assert!(
        seen.windows(2)
            .all(|pair| pair[0].bytes_written < pair[1].bytes_written),
        "snapshots must strictly increase"
    );
    assert_eq!(engine.active_transfer(), None);
}

#[tokio::test]
async fn empty_body_still_reports_once() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let engine = DownloadEngine::new().unwrap();
    let (sink, seen) = recording_sink();

    let path = engine
        .download(TransferRequest::new(url(addr, "/drivers/empty.exe"), dir.path()), sink)
        .await
        .unwrap();

    assert!(path.exists());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].bytes_written, 0);
}

#[tokio::test]
async fn bad_status_creates_no_file() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let engine = DownloadEngine::new().unwrap();
    let (sink, seen) = recording_sink();

    let err = engine
        .download(TransferRequest::new(url(addr, "/drivers/missing.exe"), dir.path()), sink)
        .await
        .unwrap_err();

    assert_eq!(err, DownloadError::BadResponse { status: 404 });
    assert!(!dir.path().join("missing.exe").exists());
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(engine.active_transfer(), None);
}

#[tokio::test]
async fn failed_stream_keeps_partial_file() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let engine = DownloadEngine::new().unwrap();
    let (sink, _seen) = recording_sink();

    let err = engine
        .download(TransferRequest::new(url(addr, "/drivers/truncated.exe"), dir.path()), sink)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Network { .. }), "got {err:?}");
    let partial = dir.path().join("truncated.exe");
    assert!(partial.exists(), "partial file must be kept after a network failure");
    assert!(std::fs::metadata(&partial).unwrap().len() <= 1024);
    assert_eq!(engine.active_transfer(), None);
}

#[tokio::test]
async fn existing_file_is_replaced() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("592.00-desktop.exe");
    std::fs::write(&target, vec![0u8; PAYLOAD_LEN * 2]).unwrap();

    let engine = DownloadEngine::new().unwrap();
    let (sink, _seen) = recording_sink();
    engine
        .download(TransferRequest::new(url(addr, "/drivers/592.00-desktop.exe"), dir.path()), sink)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), payload());
}

#[tokio::test]
async fn url_without_file_name_is_rejected() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let engine = DownloadEngine::new().unwrap();
    let (sink, _seen) = recording_sink();

    let err = engine
        .download(TransferRequest::new(url(addr, "/"), dir.path()), sink)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::InvalidUrl { .. }));
    assert_eq!(engine.active_transfer(), None);
}

#[tokio::test]
async fn cancel_mid_stream_removes_partial_file() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(DownloadEngine::new().unwrap());
    let request = TransferRequest::new(url(addr, "/drivers/stalled.exe"), dir.path());
    let id = request.id.clone();
    let (sink, mut first_chunk) = signalling_sink();

    let task = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.download(request, sink).await })
    };

    let snapshot = tokio::time::timeout(Duration::from_secs(5), first_chunk.recv())
        .await
        .expect("first chunk in time")
        .unwrap();
    assert_eq!(snapshot.bytes_written, 1024);
    assert!(dir.path().join("stalled.exe").exists());

    // A stale id changes nothing.
    assert!(!engine.cancel(&TransferId::new()));
    assert_eq!(engine.active_transfer(), Some(id.clone()));

    assert!(engine.cancel(&id));
    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("cancel unblocks the read")
        .unwrap();

    assert_eq!(result, Err(DownloadError::Cancelled));
    assert!(!dir.path().join("stalled.exe").exists());
    assert_eq!(engine.active_transfer(), None);
}

#[tokio::test]
async fn second_transfer_is_rejected_while_one_is_active() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(DownloadEngine::new().unwrap());
    let first = TransferRequest::new(url(addr, "/drivers/stalled.exe"), dir.path());
    let first_id = first.id.clone();
    let (sink, mut first_chunk) = signalling_sink();

    let task = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.download(first, sink).await })
    };
    tokio::time::timeout(Duration::from_secs(5), first_chunk.recv())
        .await
        .expect("first chunk in time");

    let (sink, _seen) = recording_sink();
    let err = engine
        .download(TransferRequest::new(url(addr, "/drivers/592.00-desktop.exe"), dir.path()), sink)
        .await
        .unwrap_err();

    assert_eq!(err, DownloadError::already_active(first_id.as_str()));
    assert!(!dir.path().join("592.00-desktop.exe").exists());
    assert_eq!(engine.active_transfer(), Some(first_id.clone()));

    engine.cancel(&first_id);
    let result = task.await.unwrap();
    assert!(result.unwrap_err().is_cancelled());
}
