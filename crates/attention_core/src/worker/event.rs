//! Inbound events delivered by the host's event loop.

use crate::host::ShownNotification;
use crate::model::account::Account;
use crate::model::intent::NotificationData;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Message `type` asking the engine to run one check cycle.
pub const CHECK_NOTIFICATIONS_MESSAGE: &str = "check-notifications";

/// Dispatch-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Message,
    NotificationClick,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::NotificationClick => "notification_click",
        }
    }
}

/// Trigger payload. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    #[serde(default)]
    pub account: Account,
}

/// Typed view of a message payload sent by a client of the same origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkerMessage {
    #[serde(rename = "check-notifications")]
    CheckNotifications(TriggerEvent),
}

impl WorkerMessage {
    /// Decodes a raw payload; unknown or malformed messages yield `None`.
    pub fn parse(value: &serde_json::Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }
}

/// Activation of a previously shown notification.
pub struct NotificationActivation {
    pub notification: Arc<dyn ShownNotification>,
    pub data: NotificationData,
}

impl Debug for NotificationActivation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationActivation")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum WorkerEvent {
    /// Raw message payload as posted by a client.
    Message(serde_json::Value),
    NotificationClick(NotificationActivation),
}

impl WorkerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Message(_) => EventKind::Message,
            Self::NotificationClick(_) => EventKind::NotificationClick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{WorkerMessage, CHECK_NOTIFICATIONS_MESSAGE};
    use serde_json::json;

    #[test]
    fn parses_check_notifications_message() {
        let message = WorkerMessage::parse(&json!({
            "type": CHECK_NOTIFICATIONS_MESSAGE,
            "account": {"_account_id": 1000096, "name": "Alice"}
        }))
        .expect("known message type");
        let WorkerMessage::CheckNotifications(trigger) = message;
        assert_eq!(trigger.account.relevance_id(), Some("1000096"));
    }

    #[test]
    fn message_without_account_decodes_with_empty_account() {
        let message = WorkerMessage::parse(&json!({"type": "check-notifications"}))
            .expect("account is optional on the wire");
        let WorkerMessage::CheckNotifications(trigger) = message;
        assert_eq!(trigger.account.relevance_id(), None);
    }

    #[test]
    fn unknown_or_malformed_messages_are_ignored() {
        assert!(WorkerMessage::parse(&json!({"type": "ping"})).is_none());
        assert!(WorkerMessage::parse(&json!("check-notifications")).is_none());
        assert!(WorkerMessage::parse(&json!(null)).is_none());
    }
}
