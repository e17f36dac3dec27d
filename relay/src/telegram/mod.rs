//! Telegram Bot API access

pub mod client;

pub use client::TelegramClient;
