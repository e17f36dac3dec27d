//! Telegram Bot API models

pub mod models;

pub use models::*;
