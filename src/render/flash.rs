//! Flash message toasts
//!
//! Dismissible alerts appended to the page's alert container. Each alert
//! carries its own id and dismissal delay; the page script removes it once
//! the delay has passed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::surface::{Document, Element};
use crate::types::RenderingTarget;

/// Element id of the alert container on every page
pub const ALERT_TARGET: &str = "alertMessage";

/// Alerts remove themselves after this long unless configured otherwise
pub const DEFAULT_DISMISS_MS: u32 = 3000;

/// Alert severity, mapped onto `alert-<level>` classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    #[default]
    Danger,
    Warning,
    Success,
    Info,
}

impl FlashLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Danger => "danger",
            FlashLevel::Warning => "warning",
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
        }
    }
}

/// A single toast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashMessage {
    pub id: String,
    pub message: String,
    pub level: FlashLevel,
}

impl FlashMessage {
    pub fn new(message: impl Into<String>, level: FlashLevel) -> Self {
        Self {
            id: format!("flash-{}", Uuid::new_v4().simple()),
            message: message.into(),
            level,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, FlashLevel::Danger)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, FlashLevel::Warning)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, FlashLevel::Info)
    }

    pub fn to_element(&self, dismiss_after_ms: u32) -> Element {
        Element::new("div")
            .attr("id", self.id.clone())
            .attr(
                "class",
                format!("alert alert-{} alert-dismissible fade show", self.level.as_str()),
            )
            .attr("role", "alert")
            .attr("data-dismiss-after", dismiss_after_ms.to_string())
            .text(self.message.clone())
            .child(
                Element::new("button")
                    .attr("type", "button")
                    .attr("class", "btn-close")
                    .attr("data-dismiss", "alert")
                    .attr("aria-label", "Close"),
            )
    }
}

/// Append `flash` to the alert container
pub fn flash_message(doc: &mut Document, flash: &FlashMessage, dismiss_after_ms: u32) {
    doc.append(
        &RenderingTarget::new(ALERT_TARGET),
        flash.to_element(dismiss_after_ms),
    );
}
