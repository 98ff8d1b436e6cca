//! Collapses relevant changes into at most one notification intent.
//!
//! # Invariants
//! - `0` changes → no intent; `1` → `PerItem`; `n > 1` → one `Aggregate`
//!   whose title and body both state `n`.

use crate::host::{ReasonFormatter, UrlBuilder};
use crate::model::account::Account;
use crate::model::change::ChangeSummary;
use crate::model::intent::{IntentKind, NotificationIntent, AGGREGATE_NOTIFICATION_TAG};

pub struct NotificationGrouper<'a> {
    reason: &'a dyn ReasonFormatter,
    urls: &'a dyn UrlBuilder,
}

impl<'a> NotificationGrouper<'a> {
    pub fn new(reason: &'a dyn ReasonFormatter, urls: &'a dyn UrlBuilder) -> Self {
        Self { reason, urls }
    }

    pub fn group(&self, account: &Account, relevant: &[ChangeSummary]) -> Option<NotificationIntent> {
        match relevant {
            [] => None,
            [change] => Some(self.per_item(account, change)),
            changes => Some(self.aggregate(changes.len())),
        }
    }

    fn per_item(&self, account: &Account, change: &ChangeSummary) -> NotificationIntent {
        let body = account
            .relevance_id()
            .and_then(|id| change.attention_entry_for(id))
            .map(|entry| self.reason.reason_text(account, change, entry));
        NotificationIntent {
            kind: IntentKind::PerItem,
            title: change.subject.clone(),
            body,
            target_url: self.urls.change_url(change),
            tag: change.id.clone(),
            item_count: 1,
        }
    }

    fn aggregate(&self, count: usize) -> NotificationIntent {
        NotificationIntent {
            kind: IntentKind::Aggregate,
            title: format!("You are in the attention set for {count} changes."),
            body: Some(format!("{count} changes are waiting for your attention.")),
            target_url: self.urls.dashboard_url(),
            tag: AGGREGATE_NOTIFICATION_TAG.to_string(),
            item_count: count,
        }
    }
}
