//! Deployment events parsed from inbound webhook payloads

use std::fmt;

use serde_json::Value;

use crate::errors::RelayError;

/// Placeholder rendered for any field the payload does not carry
pub const UNKNOWN: &str = "Unknown";

/// Event type discriminator (`type` field)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    Deploy,
    Service,
    Other(String),
}

impl EventType {
    /// Extract the discriminator. `None` when the tag is missing or falsy
    /// (`null`, `false`, `0`, `""`).
    pub fn from_payload(payload: &Value) -> Option<Self> {
        match payload.get("type")? {
            Value::String(tag) if tag.is_empty() => None,
            Value::String(tag) => Some(match tag.as_str() {
                "DEPLOY" => EventType::Deploy,
                "SERVICE" => EventType::Service,
                _ => EventType::Other(tag.clone()),
            }),
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(EventType::Other(other.to_string())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Deploy => f.write_str("DEPLOY"),
            EventType::Service => f.write_str("SERVICE"),
            EventType::Other(tag) => f.write_str(tag),
        }
    }
}

/// A deployment event. Transient: built from one request body and dropped
/// once the response is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentEvent {
    pub status: Option<String>,
    pub project_name: Option<String>,
    pub project_id: Option<String>,
    pub environment_name: Option<String>,
    pub creator_name: Option<String>,
    pub deployment_id: Option<String>,
}

impl DeploymentEvent {
    /// Extract the optional event fields. Never fails; fields of the wrong
    /// JSON kind are treated as absent.
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            status: text_at(payload, "/status"),
            project_name: text_at(payload, "/project/name"),
            project_id: text_at(payload, "/project/id"),
            environment_name: text_at(payload, "/environment/name"),
            creator_name: text_at(payload, "/deployment/creator/name"),
            deployment_id: text_at(payload, "/deployment/id"),
        }
    }

    pub fn status_or_unknown(&self) -> &str {
        or_unknown(&self.status)
    }

    pub fn project_name_or_unknown(&self) -> &str {
        or_unknown(&self.project_name)
    }

    pub fn environment_or_unknown(&self) -> &str {
        or_unknown(&self.environment_name)
    }

    pub fn creator_or_unknown(&self) -> &str {
        or_unknown(&self.creator_name)
    }

    pub fn deployment_id_or_unknown(&self) -> &str {
        or_unknown(&self.deployment_id)
    }
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNKNOWN)
}

/// Strings are taken as is (empty means absent), numbers are rendered in
/// decimal, everything else is absent.
fn text_at(payload: &Value, pointer: &str) -> Option<String> {
    match payload.pointer(pointer)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a raw request body into its discriminator and JSON document.
pub fn parse_body(body: &[u8]) -> Result<(EventType, Value), RelayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RelayError::InvalidPayload("empty body".to_string()));
    }

    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::InvalidPayload(format!("malformed JSON: {e}")))?;

    if !payload.is_object() {
        return Err(RelayError::InvalidPayload(
            "body is not a JSON object".to_string(),
        ));
    }

    let event_type = EventType::from_payload(&payload)
        .ok_or_else(|| RelayError::InvalidPayload("missing 'type' field".to_string()))?;

    Ok((event_type, payload))
}
