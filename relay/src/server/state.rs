//! Server state

use std::sync::Arc;
use std::time::Instant;

use url::Url;

use crate::notify::Notifier;

/// Server state shared across handlers
pub struct ServerState {
    pub notifier: Arc<dyn Notifier>,
    pub dashboard_url: Url,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(notifier: Arc<dyn Notifier>, dashboard_url: Url) -> Self {
        Self {
            notifier,
            dashboard_url,
            started_at: Instant::now(),
        }
    }
}
