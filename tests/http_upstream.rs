//! The reqwest-backed upstream against a fake CallMeBot on localhost.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use callmebot_mcp::call::{AuthMode, CallInvoker, CallRequest, HttpUpstream};
use callmebot_mcp::ErrorKind;
use common::spawn_fake_callmebot;

fn invoker_for(url: &str, timeout: Duration) -> CallInvoker {
    let upstream = HttpUpstream::new(url, timeout).expect("valid upstream URL");
    CallInvoker::new(Arc::new(upstream), AuthMode::Open)
}

#[tokio::test]
async fn test_sends_the_six_query_parameters() {
    let (url, seen) = spawn_fake_callmebot(StatusCode::OK, "Message Sent", Duration::ZERO).await;

    let result = invoker_for(&url, Duration::from_secs(5))
        .invoke(
            CallRequest::new("+331234567890", "Hello & goodbye")
                .with_repeat(99)
                .with_carbon_copy("missed"),
            None,
        )
        .await;

    assert!(result.succeeded());
    assert_eq!(result.upstream_body(), Some("Message Sent"));

    let queries = seen.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    let query = &queries[0];
    assert_eq!(query.len(), 6);
    assert_eq!(query["user"], "+331234567890");
    assert_eq!(query["text"], "Hello & goodbye");
    assert_eq!(query["lang"], "en-US-Standard-B");
    assert_eq!(query["rpt"], "10");
    assert_eq!(query["cc"], "missed");
    assert_eq!(query["timeout"], "30");
}

#[tokio::test]
async fn test_rate_limited_response_is_rejection() {
    let (url, _) =
        spawn_fake_callmebot(StatusCode::TOO_MANY_REQUESTS, "Rate limited", Duration::ZERO).await;

    let result = invoker_for(&url, Duration::from_secs(5))
        .invoke(CallRequest::new("@alice", "Hello"), None)
        .await;

    assert_eq!(result.error_kind(), Some(ErrorKind::UpstreamRejected));
    assert_eq!(result.upstream_body(), Some("Rate limited"));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let (url, _) =
        spawn_fake_callmebot(StatusCode::OK, "Message Sent", Duration::from_secs(3)).await;

    let result = invoker_for(&url, Duration::from_millis(200))
        .invoke(CallRequest::new("@alice", "Hello"), None)
        .await;

    assert_eq!(result.error_kind(), Some(ErrorKind::Timeout));
    assert_eq!(result.upstream_body(), None);
}

#[tokio::test]
async fn test_forwarded_timeout_does_not_bound_local_wait() {
    // Ring timeout of 5s is forwarded only; a 1s answer still succeeds under a 5s client timeout.
    let (url, seen) =
        spawn_fake_callmebot(StatusCode::OK, "Message Sent", Duration::from_secs(1)).await;

    let result = invoker_for(&url, Duration::from_secs(5))
        .invoke(
            CallRequest::new("@alice", "Hello").with_timeout_secs(5),
            None,
        )
        .await;

    assert!(result.succeeded());
    assert_eq!(seen.lock().unwrap()[0]["timeout"], "5");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = invoker_for(&format!("http://{}/start.php", addr), Duration::from_secs(5))
        .invoke(CallRequest::new("@alice", "Hello"), None)
        .await;

    assert_eq!(result.error_kind(), Some(ErrorKind::TransportError));
    assert!(!result.human_message().is_empty());
}
