use std::sync::Arc;
use std::time::{Duration, Instant};

use concierge::controller::Controller;
use concierge::core::config::{ChatTexts, DEFAULT_FAILURE_FALLBACK, DEFAULT_REPLY_FALLBACK};
use concierge::core::message::Sender;
use concierge::core::state::Conversation;
use concierge::webhook::HttpWebhook;
use tokio_test::assert_ok;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const PACING: Duration = Duration::from_millis(20);

fn controller_for(url: String, timeout: Option<Duration>, reset_on_close: bool) -> Controller {
    let webhook = HttpWebhook::new(url, timeout).unwrap();
    let state = Conversation::new(ChatTexts::default(), "it".to_string(), reset_on_close);
    Controller::new(state, Arc::new(webhook), PACING)
}

fn webhook_url(server: &MockServer) -> String {
    format!("{}/webhook/chat", server.uri())
}

async fn mount_reply(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Submits `text`, waits for the reply, and returns the last transcript entry.
async fn exchange(controller: &mut Controller, text: &str) -> String {
    controller.open();
    controller.submit(text.to_string());
    assert!(controller.state().pending);
    assert_ok!(tokio::time::timeout(Duration::from_secs(5), controller.settle()).await);
    let last = controller.state().transcript.last().unwrap();
    assert_eq!(last.sender, Sender::Assistant);
    last.text.clone()
}

async fn request_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.body_json::<serde_json::Value>().unwrap())
        .collect()
}

// ============================================================================
// Replies
// ============================================================================

#[tokio::test]
async fn test_reply_text_is_shown_verbatim() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "Nuestros planes empiezan en 99€/mes."
        })),
    )
    .await;

    let mut controller = controller_for(webhook_url(&server), None, false);
    let reply = exchange(&mut controller, "precio").await;

    assert_eq!(reply, "Nuestros planes empiezan en 99€/mes.");
    let state = controller.state();
    assert_eq!(state.transcript.len(), 3);
    assert_eq!(state.transcript.messages()[1].text, "precio");
    assert!(!state.pending);
    assert!(state.draft.is_empty());
}

#[tokio::test]
async fn test_request_body_carries_message_timestamp_and_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(webhook_url(&server), None, false);
    exchange(&mut controller, "  hola  ").await;

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["message"], "  hola  ");
    assert_eq!(body["sessionId"], controller.state().session_id.as_str());
    assert!(body["sessionId"].as_str().unwrap().starts_with("it-"));
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_missing_response_uses_reply_fallback() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(200).set_body_json(serde_json::json!({}))).await;

    let mut controller = controller_for(webhook_url(&server), None, false);
    assert_eq!(exchange(&mut controller, "hola").await, DEFAULT_REPLY_FALLBACK);
}

#[tokio::test]
async fn test_blank_response_uses_reply_fallback() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "   "})),
    )
    .await;

    let mut controller = controller_for(webhook_url(&server), None, false);
    assert_eq!(exchange(&mut controller, "hola").await, DEFAULT_REPLY_FALLBACK);
}

#[tokio::test]
async fn test_server_error_uses_failure_fallback() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

    let mut controller = controller_for(webhook_url(&server), None, false);
    assert_eq!(exchange(&mut controller, "hola").await, DEFAULT_FAILURE_FALLBACK);
}

#[tokio::test]
async fn test_non_json_body_uses_failure_fallback() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(200).set_body_string("<html>ok</html>")).await;

    let mut controller = controller_for(webhook_url(&server), None, false);
    assert_eq!(exchange(&mut controller, "hola").await, DEFAULT_FAILURE_FALLBACK);
}

#[tokio::test]
async fn test_unreachable_endpoint_uses_failure_fallback() {
    // Nothing listens on port 1
    let mut controller = controller_for("http://127.0.0.1:1/webhook/chat".to_string(), None, false);
    assert_eq!(exchange(&mut controller, "hola").await, DEFAULT_FAILURE_FALLBACK);
}

#[tokio::test]
async fn test_request_timeout_uses_failure_fallback() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"response": "too late"}))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let mut controller = controller_for(
        webhook_url(&server),
        Some(Duration::from_millis(100)),
        false,
    );
    assert_eq!(exchange(&mut controller, "hola").await, DEFAULT_FAILURE_FALLBACK);
}

// ============================================================================
// Pacing and pending
// ============================================================================

#[tokio::test]
async fn test_reply_waits_for_pacing_delay() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "Hola"})),
    )
    .await;

    let webhook = HttpWebhook::new(webhook_url(&server), None).unwrap();
    let state = Conversation::new(ChatTexts::default(), "it".to_string(), false);
    let mut controller = Controller::new(state, Arc::new(webhook), Duration::from_millis(200));

    let started = Instant::now();
    controller.submit("hola".to_string());
    assert_ok!(tokio::time::timeout(Duration::from_secs(5), controller.settle()).await);

    assert!(started.elapsed() >= Duration::from_millis(200));
    assert_eq!(controller.state().transcript.last().unwrap().text, "Hola");
}

#[tokio::test]
async fn test_submit_while_pending_sends_nothing() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"response": "Hola"}))
            .set_delay(Duration::from_millis(100)),
    )
    .await;

    let mut controller = controller_for(webhook_url(&server), None, false);
    controller.submit("primero".to_string());
    controller.submit("segundo".to_string());
    assert_ok!(tokio::time::timeout(Duration::from_secs(5), controller.settle()).await);

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["message"], "primero");
    assert_eq!(controller.state().transcript.len(), 3);
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_messages_in_one_conversation_share_session_id() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "ok"})),
    )
    .await;

    let mut controller = controller_for(webhook_url(&server), None, false);
    exchange(&mut controller, "uno").await;
    controller.close();
    exchange(&mut controller, "dos").await;

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["sessionId"], bodies[1]["sessionId"]);
    assert_eq!(controller.state().transcript.len(), 5);
}

#[tokio::test]
async fn test_reset_starts_new_session() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "ok"})),
    )
    .await;

    let mut controller = controller_for(webhook_url(&server), None, true);
    exchange(&mut controller, "uno").await;
    // Session ids are millisecond stamps
    tokio::time::sleep(Duration::from_millis(5)).await;
    controller.close();
    assert_eq!(controller.state().transcript.len(), 1);
    exchange(&mut controller, "dos").await;

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_ne!(bodies[0]["sessionId"], bodies[1]["sessionId"]);
}

#[tokio::test]
async fn test_reply_after_reset_is_discarded() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"response": "stale"}))
            .set_delay(Duration::from_millis(150)),
    )
    .await;

    let mut controller = controller_for(webhook_url(&server), None, true);
    controller.open();
    controller.submit("hola".to_string());
    controller.close();
    assert!(!controller.state().pending);

    // Let the in-flight request finish and its settlement arrive
    tokio::time::sleep(Duration::from_millis(150) + PACING * 10).await;
    controller.drain();

    let state = controller.state();
    assert_eq!(state.transcript.len(), 1);
    assert!(state.transcript.messages().iter().all(|m| m.text != "stale"));
    assert!(!state.pending);
    assert_eq!(request_bodies(&server).await.len(), 1);
}
