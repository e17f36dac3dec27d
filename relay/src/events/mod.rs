//! Inbound webhook events

pub mod deployment;
pub mod status;

pub use deployment::{parse_body, DeploymentEvent, EventType, UNKNOWN};
pub use status::{status_glyph, DEFAULT_GLYPH};
