// tests/feed_http.rs
//
// HttpFeedSource against a local wiremock endpoint: the happy path plus the
// three wire-level failure kinds (non-2xx, malformed body, failed status).
// Every failure kind must leave the poller's state exactly as it was.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use killfeed_poller::feed::{HttpFeedSource, KillfeedPoller};

async fn poller_for(server: &MockServer) -> KillfeedPoller {
    let url = format!("{}/api/killfeed", server.uri());
    KillfeedPoller::new(Box::new(HttpFeedSource::from_url(url)))
}

fn successful_body() -> serde_json::Value {
    json!({
        "status": "successful",
        "payload": [{
            "source_character": "Ana",
            "source_player_id": "p1",
            "target_character": "Bob",
            "target_player_id": "p2",
            "method": "Railgun",
            "damage": 98,
            "platform": "pc",
            "region": "eu"
        }]
    })
}

#[tokio::test]
async fn successful_response_is_merged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/killfeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(successful_body()))
        .mount(&server)
        .await;

    let poller = poller_for(&server).await;
    let snap = poller.fetch_once().await;

    assert!(!snap.loading);
    assert_eq!(snap.latest_batch.len(), 1);
    assert_eq!(snap.history.len(), 1);
    assert_eq!(snap.history[0].source_character, "Ana");
    assert_eq!(snap.history[0].damage, 98.0);
}

#[tokio::test]
async fn server_error_produces_no_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/killfeed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let poller = poller_for(&server).await;
    let snap = poller.fetch_once().await;

    assert!(!snap.loading, "first attempt must clear loading even on 500");
    assert!(snap.history.is_empty());
    assert!(snap.latest_batch.is_empty());
}

#[tokio::test]
async fn malformed_json_produces_no_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/killfeed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let poller = poller_for(&server).await;
    let snap = poller.fetch_once().await;

    assert!(!snap.loading);
    assert!(snap.history.is_empty());
}

#[tokio::test]
async fn failed_status_preserves_existing_history() {
    let server = MockServer::start().await;

    // First poll: one event.
    let guard = Mock::given(method("GET"))
        .and(path("/api/killfeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(successful_body()))
        .expect(1)
        .mount_as_scoped(&server)
        .await;

    let poller = poller_for(&server).await;
    let first = poller.fetch_once().await;
    assert_eq!(first.history.len(), 1);
    drop(guard);

    // Second poll: application-level failure with no payload.
    Mock::given(method("GET"))
        .and(path("/api/killfeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "failed"})))
        .mount(&server)
        .await;

    let second = poller.fetch_once().await;
    assert_eq!(second.history, first.history);
    assert_eq!(second.latest_batch, first.latest_batch);
}
