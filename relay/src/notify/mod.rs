//! Notification formatting and delivery

pub mod message;
pub mod notifier;

pub use message::{deployment_notification, Notification};
pub use notifier::{Notifier, TelegramNotifier};
