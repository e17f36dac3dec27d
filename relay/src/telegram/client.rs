//! Telegram Bot API client

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use telegram_models::{
    ApiResponse, InlineKeyboardMarkup, Message, ParseMode, SendMessageRequest,
};
use tracing::{debug, error};
use url::Url;

use crate::errors::RelayError;
use crate::notify::message::Notification;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Bot API
pub struct TelegramClient {
    client: Client,
    base_url: String,
    bot_token: SecretString,
}

impl TelegramClient {
    /// Create a new client
    pub fn new(base_url: &Url, bot_token: SecretString) -> Result<Self, RelayError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            bot_token,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url,
            self.bot_token.expose_secret(),
            method
        )
    }

    /// Send an HTML message with link previews disabled. Returns the id of
    /// the sent message.
    pub async fn send_message(
        &self,
        chat_id: &str,
        notification: &Notification,
    ) -> Result<i64, RelayError> {
        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: notification.text.clone(),
            parse_mode: Some(ParseMode::Html),
            disable_web_page_preview: true,
            reply_markup: notification
                .button()
                .map(|(label, url)| InlineKeyboardMarkup::single_url_button(label, url)),
        };

        debug!("POST sendMessage (chat {})", chat_id);
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await
            // reqwest errors embed the request URL, which carries the token
            .map_err(|e| e.without_url())?;

        let status = response.status();
        let body = response.text().await.map_err(|e| e.without_url())?;

        let envelope: ApiResponse<Message> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("sendMessage returned undecodable body: {} - {}", status, body);
                return Err(RelayError::TelegramError(format!(
                    "{status}: undecodable response: {e}"
                )));
            }
        };

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(message),
                ..
            } if status.is_success() => Ok(message.message_id),
            ApiResponse {
                description,
                error_code,
                ..
            } => Err(RelayError::TelegramError(format!(
                "{}: {} (error_code {})",
                status,
                description.as_deref().unwrap_or("no description"),
                error_code.map_or_else(|| "n/a".to_string(), |code| code.to_string())
            ))),
        }
    }
}
