//! Human-readable reason text for per-item notifications.

use crate::model::account::Account;
use crate::model::change::{AttentionEntry, ChangeSummary};

const FALLBACK_REASON: &str = "This change is waiting for your attention.";

/// Turns an attention entry into the body of a per-item notification.
pub trait ReasonFormatter: Send + Sync {
    fn reason_text(&self, account: &Account, change: &ChangeSummary, entry: &AttentionEntry)
        -> String;
}

/// `"<added by>: <reason>"`, or the bare reason, or a generic sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReasonFormatter;

impl ReasonFormatter for DefaultReasonFormatter {
    fn reason_text(
        &self,
        _account: &Account,
        _change: &ChangeSummary,
        entry: &AttentionEntry,
    ) -> String {
        let reason = entry.reason_text.trim();
        if reason.is_empty() {
            return FALLBACK_REASON.to_string();
        }
        match entry.added_by.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{name}: {reason}"),
            _ => reason.to_string(),
        }
    }
}
