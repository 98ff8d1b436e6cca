//! Attention notification engine.
//!
//! Decides, from one durably persisted timestamp, whether a trigger justifies
//! checking the remote system for changes awaiting an account's attention,
//! collapses the new ones into at most one notification, and routes
//! notification clicks to a window. Every host primitive is injected.

pub mod config;
pub mod db;
pub mod host;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod transport;
pub mod worker;

pub use config::{ConfigError, NotifierConfig, DEFAULT_THROTTLE_INTERVAL_MS};
pub use host::{
    ChangeSource, Clock, DefaultReasonFormatter, FetchError, GerritUrlBuilder,
    NotificationPresenter, PresentationError, ReasonFormatter, RoutingError, ShownNotification,
    SystemClock, UrlBuilder, WindowClient, WindowClients,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountId};
pub use model::change::{AttentionEntry, ChangeSummary};
pub use model::intent::{IntentKind, NotificationData, NotificationIntent};
pub use model::state::{TimestampMs, WorkerState, NEVER_TIMESTAMP_MS};
pub use repo::state_repo::{RepoError, RepoResult, SqliteStateRepository, StateRepository};
pub use service::filter::filter_attention_changes_after;
pub use service::grouping::NotificationGrouper;
pub use service::state_manager::StateManager;
pub use service::throttle::{decide as decide_throttle, ThrottleDecision};
pub use transport::{parse_change_list, HttpChangeSource, HttpCredentials};
pub use worker::dispatch::{
    DispatchError, DispatchOutcome, EventDispatcher, EventHandler, HandlerTask, LifetimeExtender,
};
pub use worker::engine::{CheckEngine, CycleOutcome};
pub use worker::event::{
    EventKind, NotificationActivation, TriggerEvent, WorkerEvent, WorkerMessage,
    CHECK_NOTIFICATIONS_MESSAGE,
};
pub use worker::lifetime::TaskTracker;
pub use worker::router::{ActivationRouter, RouteOutcome};
pub use worker::{HostCapabilities, NotificationWorker};

/// Minimal health-check API for host integration smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
