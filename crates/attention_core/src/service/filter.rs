//! Relevance filter over fetched change summaries.

use crate::model::change::ChangeSummary;
use crate::model::state::TimestampMs;

/// Keeps changes whose attention entry for `account_id` is strictly newer
/// than `cutoff_ms`, preserving input order.
pub fn filter_attention_changes_after(
    changes: Vec<ChangeSummary>,
    account_id: &str,
    cutoff_ms: TimestampMs,
) -> Vec<ChangeSummary> {
    changes
        .into_iter()
        .filter(|change| {
            change
                .attention_entry_for(account_id)
                .is_some_and(|entry| entry.updated_at_ms > cutoff_ms)
        })
        .collect()
}
