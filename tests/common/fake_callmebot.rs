//! In-process CallMeBot stand-in served by axum.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

/// Query strings received by a fake CallMeBot.
pub type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    seen: SeenQueries,
}

async fn start_php(
    State(state): State<FakeState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    state
        .seen
        .lock()
        .expect("fake lock poisoned")
        .push(query);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body)
}

/// Serve a fake CallMeBot on an ephemeral port. Returns its `start.php` URL
/// and the queries it receives.
pub async fn spawn_fake_callmebot(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> (String, SeenQueries) {
    let seen: SeenQueries = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        status,
        body,
        delay,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/start.php", get(start_php))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake CallMeBot");
    let addr = listener.local_addr().expect("fake CallMeBot has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (format!("http://{}/start.php", addr), seen)
}
