//! Deploy Relay Library
//!
//! Receives CI/CD deployment webhooks and relays them as formatted
//! notifications to a single Telegram chat.

pub mod app;
pub mod errors;
pub mod events;
pub mod logs;
pub mod notify;
pub mod server;
pub mod telegram;
pub mod utils;
