//! Telegram delivery tests against a mock Bot API.
//!
//! Covers the outgoing `sendMessage` shape and the fire-and-forget guarantee:
//! a failing Bot API never changes the webhook response.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use deploy_relay::errors::RelayError;
use deploy_relay::notify::{Notification, TelegramNotifier};
use deploy_relay::telegram::TelegramClient;
use secrecy::SecretString;
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{app_with, post_webhook};

const TOKEN: &str = "test-token";
const SEND_PATH: &str = "/bottest-token/sendMessage";

fn client_for(server: &MockServer) -> TelegramClient {
    let base = Url::parse(&server.uri()).unwrap();
    TelegramClient::new(&base, SecretString::from(TOKEN.to_string())).unwrap()
}

fn ok_response(message_id: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ok": true,
        "result": {"message_id": message_id, "date": 1700000000}
    }))
}

async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect()
}

#[tokio::test]
async fn send_message_posts_html_with_button() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_partial_json(json!({
            "chat_id": "-1001",
            "text": "<b>hello</b>",
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
            "reply_markup": {
                "inline_keyboard": [[{"text": "View Deployment", "url": "https://service-host/"}]]
            }
        })))
        .respond_with(ok_response(7))
        .expect(1)
        .mount(&server)
        .await;

    let notification =
        Notification::text("<b>hello</b>").with_button("View Deployment", "https://service-host/");
    let message_id = client_for(&server)
        .send_message("-1001", &notification)
        .await
        .unwrap();

    assert_eq!(message_id, 7);
}

#[tokio::test]
async fn send_message_without_button_has_no_markup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ok_response(8))
        .mount(&server)
        .await;

    let mut notification = Notification::text("plain");
    notification.button_label = Some("label only".to_string());
    client_for(&server)
        .send_message("42", &notification)
        .await
        .unwrap();

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].get("reply_markup").is_none());
    assert_eq!(bodies[0]["disable_web_page_preview"], true);
}

#[tokio::test]
async fn rejected_call_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .send_message("nowhere", &Notification::text("hi"))
        .await;

    match result {
        Err(RelayError::TelegramError(msg)) => assert!(msg.contains("chat not found"), "{msg}"),
        other => panic!("expected Telegram error, got {:?}", other),
    }
}

#[tokio::test]
async fn undecodable_response_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .send_message("42", &Notification::text("hi"))
        .await;

    assert!(matches!(result, Err(RelayError::TelegramError(_))));
}

#[tokio::test]
async fn network_errors_do_not_leak_the_token() {
    // Nothing listens on port 1
    let base = Url::parse("http://127.0.0.1:1").unwrap();
    let client = TelegramClient::new(&base, SecretString::from(TOKEN.to_string())).unwrap();

    let err = client
        .send_message("42", &Notification::text("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::HttpError(_)));
    assert!(!err.to_string().contains(TOKEN));
}

#[tokio::test]
async fn deploy_webhook_is_relayed_to_the_bot_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_partial_json(json!({"chat_id": "-1001"})))
        .respond_with(ok_response(9))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(client_for(&server), "-1001");
    let app = app_with(Arc::new(notifier));

    let (status, body) = post_webhook(
        &app,
        r#"{"type":"DEPLOY","status":"SUCCESS","project":{"name":"api","id":"p1"},"environment":{"name":"prod"},"deployment":{"id":"d1","creator":{"name":"alice"}}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0]["reply_markup"]["inline_keyboard"][0][0]["url"],
        "https://service-host/project/p1/deployments"
    );
    let text = bodies[0]["text"].as_str().unwrap();
    assert!(text.contains("alice"));
    assert!(text.contains("✅"));
}

#[tokio::test]
async fn failed_delivery_still_acknowledges_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "ok": false,
            "error_code": 500,
            "description": "Internal Server Error"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with(Arc::new(TelegramNotifier::new(client_for(&server), "-1001")));

    let (status, body) = post_webhook(&app, r#"{"type":"DEPLOY","status":"CRASHED"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
}

#[tokio::test]
async fn unreachable_bot_api_still_acknowledges_webhook() {
    let base = Url::parse("http://127.0.0.1:1").unwrap();
    let client = TelegramClient::new(&base, SecretString::from(TOKEN.to_string())).unwrap();
    let app = app_with(Arc::new(TelegramNotifier::new(client, "-1001")));

    let (status, body) = post_webhook(&app, r#"{"type":"DEPLOY"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
}
