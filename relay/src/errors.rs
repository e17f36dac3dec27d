//! Error types for the deploy relay

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};
use webhook_models::ErrorResponse;

/// Main error type for the deploy relay
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Telegram API error: {0}")]
    TelegramError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Shutdown error: {0}")]
    ShutdownError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::InvalidPayload(reason) => {
                warn!("Rejected webhook payload: {}", reason);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("Invalid payload")),
                )
                    .into_response()
            }
            other => {
                error!("Error handling request: {}", other);
                internal_error_response()
            }
        }
    }
}

/// The 500 body shared by handler errors and caught panics
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
        .into_response()
}

impl From<std::fmt::Error> for RelayError {
    fn from(err: std::fmt::Error) -> Self {
        RelayError::Internal(format!("formatting failed: {err}"))
    }
}
