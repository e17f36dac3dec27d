//! Shared helpers for HTTP integration tests.
//!
//! Requests go through the full axum router with `tower::ServiceExt::oneshot`;
//! a [`RecordingNotifier`] captures what would have been delivered.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use deploy_relay::notify::{Notification, Notifier};
use deploy_relay::server::serve::router;
use deploy_relay::server::state::ServerState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

pub const DASHBOARD: &str = "https://service-host";

/// Notifier that records every notification instead of sending it
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) {
        self.sent.lock().unwrap().push(notification.clone());
    }
}

/// Notifier that panics, standing in for an unexpected handler failure
pub struct PanickingNotifier;

#[async_trait]
impl Notifier for PanickingNotifier {
    async fn notify(&self, _notification: &Notification) {
        panic!("notifier exploded");
    }
}

pub fn app_with(notifier: Arc<dyn Notifier>) -> Router {
    let dashboard = Url::parse(DASHBOARD).unwrap();
    router(Arc::new(ServerState::new(notifier, dashboard)))
}

/// Router plus the recorder it delivers into
pub fn recording_app() -> (Router, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (app_with(notifier.clone()), notifier)
}

/// Send a request and return the status with the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn post_webhook(app: &Router, body: &str) -> (StatusCode, Value) {
    send(app, Method::POST, "/webhook", Some(body)).await
}
