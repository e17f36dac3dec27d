//! Main application run loop

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinError;
use tracing::{error, info};

use crate::app::options::{AppOptions, TelegramOptions};
use crate::errors::RelayError;
use crate::notify::{Notifier, TelegramNotifier};
use crate::server::serve::serve;
use crate::server::state::ServerState;
use crate::telegram::TelegramClient;

/// Maximum time in-flight requests get to finish after a shutdown signal
const MAX_SHUTDOWN_DELAY: Duration = Duration::from_secs(30);

/// Run the relay until `shutdown_signal` resolves or the server fails
pub async fn run(
    options: AppOptions,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), RelayError> {
    info!("Initializing deploy relay...");

    let AppOptions {
        server,
        telegram,
        dashboard_url,
        ..
    } = options;

    let notifier = init_notifier(telegram)?;
    let state = Arc::new(ServerState::new(notifier, dashboard_url));

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
    let mut server_handle = serve(&server, state, async move {
        let _ = shutdown_rx.recv().await;
    })
    .await?;

    tokio::select! {
        _ = shutdown_signal => {
            info!("Shutdown signal received, shutting down...");
        }
        result = &mut server_handle => {
            error!("HTTP server stopped unexpectedly");
            return flatten(result);
        }
    }

    let _ = shutdown_tx.send(());
    match tokio::time::timeout(MAX_SHUTDOWN_DELAY, server_handle).await {
        Ok(result) => {
            flatten(result)?;
            info!("Shutdown complete");
            Ok(())
        }
        Err(_) => Err(RelayError::ShutdownError(format!(
            "in-flight requests did not finish within {:?}",
            MAX_SHUTDOWN_DELAY
        ))),
    }
}

fn init_notifier(options: TelegramOptions) -> Result<Arc<dyn Notifier>, RelayError> {
    info!(
        "Delivering notifications to chat {} via {}",
        options.chat_id, options.api_base_url
    );
    let client = TelegramClient::new(&options.api_base_url, options.bot_token)?;
    Ok(Arc::new(TelegramNotifier::new(client, options.chat_id)))
}

fn flatten(result: Result<Result<(), RelayError>, JoinError>) -> Result<(), RelayError> {
    result.map_err(|e| RelayError::ServerError(e.to_string()))?
}
