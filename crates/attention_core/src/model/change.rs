//! Change summaries fetched from the remote system.

use crate::model::account::AccountId;
use crate::model::state::TimestampMs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-account marker that a change awaits that account's action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttentionEntry {
    pub reason_text: String,
    /// Unix epoch milliseconds of the last attention update.
    pub updated_at_ms: TimestampMs,
    /// Display name of whoever added the entry, when the remote reports it.
    pub added_by: Option<String>,
}

impl AttentionEntry {
    pub fn new(reason_text: impl Into<String>, updated_at_ms: TimestampMs) -> Self {
        Self {
            reason_text: reason_text.into(),
            updated_at_ms,
            added_by: None,
        }
    }
}

/// One candidate item returned by the change source. Transient per cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub id: String,
    pub project: Option<String>,
    pub number: Option<u64>,
    pub subject: String,
    pub attention_entries: BTreeMap<AccountId, AttentionEntry>,
}

impl ChangeSummary {
    pub fn new(id: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project: None,
            number: None,
            subject: subject.into(),
            attention_entries: BTreeMap::new(),
        }
    }

    /// Builder helper used by transports and tests.
    pub fn with_attention(mut self, account_id: impl Into<AccountId>, entry: AttentionEntry) -> Self {
        self.attention_entries.insert(account_id.into(), entry);
        self
    }

    pub fn attention_entry_for(&self, account_id: &str) -> Option<&AttentionEntry> {
        self.attention_entries.get(account_id)
    }
}
