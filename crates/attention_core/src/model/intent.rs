//! Notification intents derived from one check cycle.

use serde::{Deserialize, Serialize};

/// Tag attached to aggregate notifications so repeated ones replace each other.
pub const AGGREGATE_NOTIFICATION_TAG: &str = "attention-dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Exactly one relevant item.
    PerItem,
    /// Two or more relevant items collapsed into one dashboard notification.
    Aggregate,
}

/// In-memory description of the single notification to present for a cycle.
///
/// Never persisted; consumed immediately by the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationIntent {
    pub kind: IntentKind,
    pub title: String,
    pub body: Option<String>,
    pub target_url: String,
    /// Per-item intents carry the change id; aggregates share one tag.
    pub tag: String,
    pub item_count: usize,
}

impl NotificationIntent {
    /// Opaque data attached to the shown notification and returned on click.
    pub fn data(&self) -> NotificationData {
        NotificationData {
            url: Some(self.target_url.clone()),
        }
    }
}

/// Payload carried by a shown notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    #[serde(default)]
    pub url: Option<String>,
}

impl NotificationData {
    /// Returns the activation target, ignoring blank values.
    pub fn target_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
