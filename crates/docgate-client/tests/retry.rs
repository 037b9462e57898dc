//! Client Retry Tests
//!
//! Exercise the client against plain axum servers:
//! - A server that starts after the first request is sent
//! - Non-200 responses are returned without retrying
//! - An absent server exhausts the attempt budget

use axum::{http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use docgate_client::{ClientError, DocumentClient, RetryPolicy};

/// Reserve a loopback port and release it so a server can bind it later
fn free_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

async fn serve(addr: SocketAddr, router: Router) {
    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, router).await.unwrap();
}

#[tokio::test]
async fn test_tolerates_late_server_start() {
    let addr = free_addr();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        serve(addr, Router::new().route("/ping", get(|| async { "pong" }))).await;
    });

    let client = DocumentClient::new(format!("http://{}", addr));
    let body = client.get("/ping").await.unwrap();
    assert_eq!(&body[..], b"pong");
}

#[tokio::test]
async fn test_status_errors_not_retried() {
    let addr = free_addr();
    let hits = Arc::new(AtomicU32::new(0));

    let counter = hits.clone();
    let router = Router::new().route(
        "/document",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (StatusCode::BAD_REQUEST, "invalid request")
            }
        }),
    );
    tokio::spawn(serve(addr, router));

    let client = DocumentClient::new(format!("http://{}", addr));
    let err = client.get("/document").await.unwrap_err();

    assert_eq!(err.to_string(), "invalid request");
    assert!(matches!(err, ClientError::Status { .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_gives_up_without_server() {
    let addr = free_addr();
    let client = DocumentClient::new(format!("http://{}", addr))
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(10)));

    let err = client.post("/document", "{}").await.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
}

#[tokio::test]
async fn test_non_json_success_is_invalid_response() {
    let addr = free_addr();
    tokio::spawn(serve(
        addr,
        Router::new().route("/document/{id}", get(|| async { "not json" })),
    ));

    let client = DocumentClient::new(format!("http://{}", addr));
    let err = client.resolve("/document", "did:sidetree:abc").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}
