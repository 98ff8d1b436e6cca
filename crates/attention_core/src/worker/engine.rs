//! One check cycle: throttle → fetch → filter → group → present.
//!
//! # Invariants
//! - A throttled cycle neither fetches nor writes state.
//! - A proceeding cycle persists `now` before fetching; the cutoff used for
//!   filtering is the timestamp read before that write.
//! - Every failure ends the cycle with zero notifications; nothing propagates.

use crate::host::{ChangeSource, Clock, NotificationPresenter, ReasonFormatter, UrlBuilder};
use crate::model::account::Account;
use crate::model::intent::NotificationIntent;
use crate::service::filter::filter_attention_changes_after;
use crate::service::grouping::NotificationGrouper;
use crate::service::state_manager::StateManager;
use crate::service::throttle::{begin_cycle, ThrottleDecision};
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Terminal state of one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Trigger carried no usable account.
    Ignored,
    Throttled,
    FetchFailed,
    /// Nothing new for the account.
    Suppressed,
    Presented(NotificationIntent),
    PresentationFailed(NotificationIntent),
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Throttled => "throttled",
            Self::FetchFailed => "fetch_failed",
            Self::Suppressed => "suppressed",
            Self::Presented(_) => "presented",
            Self::PresentationFailed(_) => "presentation_failed",
        }
    }
}

pub struct CheckEngine {
    pub(crate) context_id: Uuid,
    pub(crate) state: StateManager,
    pub(crate) changes: Arc<dyn ChangeSource>,
    pub(crate) presenter: Arc<dyn NotificationPresenter>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) reason: Arc<dyn ReasonFormatter>,
    pub(crate) urls: Arc<dyn UrlBuilder>,
    pub(crate) throttle_interval_ms: u64,
}

impl CheckEngine {
    pub fn throttle_interval_ms(&self) -> u64 {
        self.throttle_interval_ms
    }

    /// Runs one check cycle for `account`.
    pub async fn run_cycle(&self, account: &Account) -> CycleOutcome {
        let Some(account_id) = account.relevance_id() else {
            info!(
                "event=check_cycle module=engine status=skip reason=missing_account context={}",
                self.context_id
            );
            return CycleOutcome::Ignored;
        };

        let now_ms = self.clock.now_ms();
        let cutoff_ms = match begin_cycle(&self.state, now_ms, self.throttle_interval_ms) {
            ThrottleDecision::Throttled { .. } => return CycleOutcome::Throttled,
            ThrottleDecision::Proceed { cutoff_ms, .. } => cutoff_ms,
        };

        let fetched = match self.changes.fetch_attention_changes(account).await {
            Ok(changes) => changes,
            Err(err) => {
                warn!(
                    "event=check_cycle module=engine status=error error_code=fetch_failed context={} error={}",
                    self.context_id, err
                );
                return CycleOutcome::FetchFailed;
            }
        };
        info!(
            "event=check_cycle module=engine status=ok stage=fetched context={} fetched={}",
            self.context_id,
            fetched.len()
        );
        let relevant = filter_attention_changes_after(fetched, account_id, cutoff_ms);
        info!(
            "event=check_cycle module=engine status=ok stage=filtered context={} relevant={}",
            self.context_id,
            relevant.len()
        );

        let grouper = NotificationGrouper::new(self.reason.as_ref(), self.urls.as_ref());
        let Some(intent) = grouper.group(account, &relevant) else {
            info!("{}", outcome_line(self.context_id, &CycleOutcome::Suppressed));
            return CycleOutcome::Suppressed;
        };

        match self.presenter.show_notification(&intent).await {
            Ok(()) => {
                info!(
                    "event=notification_show module=engine status=ok kind={:?} items={} context={}",
                    intent.kind, intent.item_count, self.context_id
                );
                let outcome = CycleOutcome::Presented(intent);
                info!("{}", outcome_line(self.context_id, &outcome));
                outcome
            }
            Err(err) => {
                warn!(
                    "event=notification_show module=engine status=error error_code=presentation_failed context={} error={}",
                    self.context_id, err
                );
                let outcome = CycleOutcome::PresentationFailed(intent);
                warn!("{}", outcome_line(self.context_id, &outcome));
                outcome
            }
        }
    }
}

/// Terminal `check_cycle` line shared by every outcome that reaches grouping.
fn outcome_line(context_id: Uuid, outcome: &CycleOutcome) -> String {
    let status = match outcome {
        CycleOutcome::FetchFailed | CycleOutcome::PresentationFailed(_) => "error",
        _ => "ok",
    };
    format!(
        "event=check_cycle module=engine status={status} outcome={} context={context_id}",
        outcome.as_str()
    )
}
