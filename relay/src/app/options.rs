//! Application configuration options

use std::path::PathBuf;

use secrecy::SecretString;
use url::Url;

use crate::errors::RelayError;
use crate::logs::{LogFormat, LogLevel, LogOptions};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DASHBOARD_URL: &str = "https://railway.app";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Main application options, built once at startup
#[derive(Debug)]
pub struct AppOptions {
    /// HTTP listener configuration
    pub server: ServerOptions,

    /// Destination chat and bot credential
    pub telegram: TelegramOptions,

    /// Base URL of the deployment dashboard used for navigation links
    pub dashboard_url: Url,

    /// Logging configuration
    pub log: LogOptions,
}

impl AppOptions {
    /// Build options from the process environment
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build options from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                RelayError::ConfigError(format!("{key} environment variable is required"))
            })
        };

        let bot_token = require("TELEGRAM_BOT_TOKEN")?;
        let chat_id = require("TELEGRAM_CHAT_ID")?;

        let port = match get("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| RelayError::ConfigError(format!("invalid PORT '{port}': {e}")))?,
            None => DEFAULT_PORT,
        };

        let api_base_url = parse_http_url(
            "TELEGRAM_API_URL",
            &get("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
        )?;
        let dashboard_url = parse_http_url(
            "DASHBOARD_URL",
            &get("DASHBOARD_URL").unwrap_or_else(|| DEFAULT_DASHBOARD_URL.to_string()),
        )?;

        let log = LogOptions {
            log_level: get("LOG_LEVEL")
                .map(|level| level.parse::<LogLevel>())
                .transpose()
                .map_err(RelayError::ConfigError)?
                .unwrap_or_default(),
            format: get("LOG_FORMAT")
                .map(|format| format.parse::<LogFormat>())
                .transpose()
                .map_err(RelayError::ConfigError)?
                .unwrap_or_default(),
            log_dir: get("LOG_DIR").map(PathBuf::from),
        };

        Ok(Self {
            server: ServerOptions {
                host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            telegram: TelegramOptions {
                bot_token: SecretString::from(bot_token),
                chat_id,
                api_base_url,
            },
            dashboard_url,
            log,
        })
    }
}

fn parse_http_url(key: &str, raw: &str) -> Result<Url, RelayError> {
    let url = Url::parse(raw)
        .map_err(|e| RelayError::ConfigError(format!("invalid {key} '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(RelayError::ConfigError(format!(
            "{key} must be an http(s) URL, got scheme '{scheme}'"
        ))),
    }
}

/// Telegram Bot API options
#[derive(Debug)]
pub struct TelegramOptions {
    /// Bot credential, redacted from debug output
    pub bot_token: SecretString,

    /// Destination chat identifier
    pub chat_id: String,

    /// Base URL of the Bot API
    pub api_base_url: Url,
}

/// HTTP server options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
