//! HTTP server setup

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use axum::{
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::app::options::ServerOptions;
use crate::errors::{internal_error_response, RelayError};
use crate::server::handlers::{
    health_handler, index_handler, method_not_allowed_handler, not_found_handler,
    version_handler, webhook_handler,
};
use crate::server::state::ServerState;

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Service description, health and version
        .route("/", get(index_handler).fallback(not_found_handler))
        .route("/health", get(health_handler).fallback(not_found_handler))
        .route("/version", get(version_handler).fallback(not_found_handler))
        // Webhooks
        .route(
            "/webhook",
            post(webhook_handler).fallback(method_not_allowed_handler),
        )
        .fallback(not_found_handler)
        // State and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Request handler panicked: {}", detail);
    internal_error_response()
}

/// Start the HTTP server
pub async fn serve(
    options: &ServerOptions,
    state: Arc<ServerState>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<JoinHandle<Result<(), RelayError>>, RelayError> {
    let app = router(state);

    let addr = format!("{}:{}", options.host, options.port);
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| RelayError::ServerError(format!("failed to bind {addr}: {e}")))?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| RelayError::ServerError(e.to_string()))
    });

    Ok(handle)
}
