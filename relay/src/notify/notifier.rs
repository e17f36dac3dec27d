//! Notification delivery

use async_trait::async_trait;
use tracing::{error, info};

use crate::notify::message::Notification;
use crate::telegram::client::TelegramClient;

/// Delivers notifications to the configured chat.
///
/// Delivery is fire-and-forget: implementations absorb and log their own
/// failures, so callers never observe them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification);
}

/// Notifier posting to a single Telegram chat
pub struct TelegramNotifier {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(client: TelegramClient, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            chat_id: chat_id.into(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, notification: &Notification) {
        match self.client.send_message(&self.chat_id, notification).await {
            Ok(message_id) => {
                info!(message_id, "Notification delivered to chat {}", self.chat_id);
            }
            Err(e) => {
                error!("Failed to deliver notification to chat {}: {}", self.chat_id, e);
            }
        }
    }
}
