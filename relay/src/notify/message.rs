//! Notification formatting

use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone};
use url::Url;

use crate::errors::RelayError;
use crate::events::{status_glyph, DeploymentEvent};

pub const DEPLOYMENT_BUTTON_LABEL: &str = "View Deployment";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// HTML-formatted body
    pub text: String,
    pub button_label: Option<String>,
    pub button_url: Option<String>,
}

impl Notification {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            button_label: None,
            button_url: None,
        }
    }

    pub fn with_button(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.button_label = Some(label.into());
        self.button_url = Some(url.into());
        self
    }

    /// The inline button, only when both label and URL are set
    pub fn button(&self) -> Option<(&str, &str)> {
        match (&self.button_label, &self.button_url) {
            (Some(label), Some(url)) => Some((label.as_str(), url.as_str())),
            _ => None,
        }
    }
}

/// Build the full notification for a `DEPLOY` event
pub fn deployment_notification<Tz>(
    event: &DeploymentEvent,
    dashboard_url: &Url,
    now: &DateTime<Tz>,
) -> Result<Notification, RelayError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let text = format_deployment_message(event, now)?;
    let link = deployment_link(dashboard_url, event.project_id.as_deref())?;
    Ok(Notification::text(text).with_button(DEPLOYMENT_BUTTON_LABEL, link))
}

/// Render the HTML message body for a deployment event
pub fn format_deployment_message<Tz>(
    event: &DeploymentEvent,
    now: &DateTime<Tz>,
) -> Result<String, RelayError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let status = event.status_or_unknown();
    let mut text = String::with_capacity(256);

    writeln!(text, "🚂 <b>Deployment Update</b>")?;
    writeln!(text)?;
    writeln!(
        text,
        "<b>Project:</b> {}",
        escape_html(event.project_name_or_unknown())
    )?;
    writeln!(
        text,
        "<b>Status:</b> {} {}",
        status_glyph(status),
        escape_html(status)
    )?;
    writeln!(
        text,
        "<b>Environment:</b> {}",
        escape_html(event.environment_or_unknown())
    )?;
    writeln!(
        text,
        "<b>Creator:</b> {}",
        escape_html(event.creator_or_unknown())
    )?;
    writeln!(
        text,
        "<b>Deployment ID:</b> <code>{}</code>",
        escape_html(event.deployment_id_or_unknown())
    )?;
    write!(text, "<b>Time:</b> {}", now.format(TIME_FORMAT))?;

    Ok(text)
}

/// Dashboard link for a project's deployments, or the dashboard landing page
/// when the project is unknown.
pub fn deployment_link(dashboard_url: &Url, project_id: Option<&str>) -> Result<String, RelayError> {
    let Some(project_id) = project_id else {
        return Ok(dashboard_url.to_string());
    };

    let mut url = dashboard_url.clone();
    url.path_segments_mut()
        .map_err(|_| RelayError::Internal(format!("cannot extend URL '{dashboard_url}'")))?
        .pop_if_empty()
        .push("project")
        .push(project_id)
        .push("deployments");
    Ok(url.to_string())
}

/// Escape the characters the Bot API HTML parse mode treats as markup
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
