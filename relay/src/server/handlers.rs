//! HTTP request handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Local, SecondsFormat, Utc};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;
use webhook_models::{
    AckResponse, EndpointInfo, ErrorResponse, HealthResponse, ServiceInfoResponse,
    VersionResponse,
};

use crate::errors::RelayError;
use crate::events::{parse_body, DeploymentEvent, EventType};
use crate::notify::deployment_notification;
use crate::server::state::ServerState;
use crate::utils::{uptime_secs, version_info};

/// Webhook handler
pub async fn webhook_handler(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<AckResponse>, RelayError> {
    let span = info_span!("webhook", request_id = %Uuid::new_v4());
    handle_webhook(&state, &body).instrument(span).await?;
    Ok(Json(AckResponse::accepted()))
}

async fn handle_webhook(state: &ServerState, body: &[u8]) -> Result<(), RelayError> {
    let (event_type, payload) = parse_body(body)?;
    debug!("Webhook received with type {}", event_type);

    match event_type {
        EventType::Deploy => {
            let event = DeploymentEvent::from_payload(&payload);
            info!(
                status = event.status_or_unknown(),
                project = event.project_name_or_unknown(),
                environment = event.environment_or_unknown(),
                "Deployment event received"
            );

            let notification =
                deployment_notification(&event, &state.dashboard_url, &Local::now())?;
            state.notifier.notify(&notification).await;
        }
        EventType::Service => {
            info!("Service event received, not forwarded");
        }
        EventType::Other(tag) => {
            info!("Unhandled event type '{}', acknowledged only", tag);
        }
    }

    Ok(())
}

/// Non-POST methods on the webhook path
pub async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(ErrorResponse::with_message(
            "Method Not Allowed",
            "This endpoint only accepts POST requests",
        )),
    )
}

/// Health check handler
pub async fn health_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: uptime_secs(state.started_at),
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    let version = version_info();
    Json(VersionResponse {
        version: version.version,
        git_hash: version.git_hash,
        build_time: version.build_time,
    })
}

/// Service description handler
pub async fn index_handler() -> impl IntoResponse {
    let endpoint = |method: &str, path: &str, description: &str| EndpointInfo {
        method: method.to_string(),
        path: path.to_string(),
        description: description.to_string(),
    };

    Json(ServiceInfoResponse {
        service: "deploy-relay".to_string(),
        description: "Relays deployment webhooks to a Telegram chat".to_string(),
        version: version_info().version,
        endpoints: vec![
            endpoint("POST", "/webhook", "Receive deployment webhooks"),
            endpoint("GET", "/health", "Health check"),
            endpoint("GET", "/version", "Build information"),
            endpoint("GET", "/", "This service description"),
        ],
    })
}

/// Fallback for unmatched paths and methods
pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Endpoint not found")),
    )
}
