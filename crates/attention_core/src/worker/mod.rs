//! Event-driven worker wiring.
//!
//! # Responsibility
//! - Bundle injected host capabilities into a check engine and a router.
//! - Register both as handlers in an explicit dispatch table.
//!
//! # Invariants
//! - Nothing cached on a `NotificationWorker` outlives its execution context;
//!   every cycle reloads durable state.

pub mod dispatch;
pub mod engine;
pub mod event;
pub mod lifetime;
pub mod router;

use crate::config::{ConfigError, NotifierConfig};
use crate::host::{
    ChangeSource, Clock, DefaultReasonFormatter, GerritUrlBuilder, NotificationPresenter,
    ReasonFormatter, SystemClock, UrlBuilder, WindowClients,
};
use crate::repo::state_repo::StateRepository;
use crate::service::state_manager::StateManager;
use dispatch::{DispatchError, EventDispatcher, EventHandler, HandlerTask};
use engine::CheckEngine;
use event::{EventKind, WorkerEvent, WorkerMessage};
use futures_util::FutureExt;
use log::{debug, info};
use router::ActivationRouter;
use std::sync::Arc;
use uuid::Uuid;

/// Every host primitive the worker needs.
#[derive(Clone)]
pub struct HostCapabilities {
    pub state: Arc<dyn StateRepository>,
    pub changes: Arc<dyn ChangeSource>,
    pub presenter: Arc<dyn NotificationPresenter>,
    pub windows: Arc<dyn WindowClients>,
    pub clock: Arc<dyn Clock>,
    pub reason: Arc<dyn ReasonFormatter>,
    pub urls: Arc<dyn UrlBuilder>,
}

impl HostCapabilities {
    /// Fills clock, reason text and URL building with the defaults for `config`.
    pub fn with_defaults(
        config: &NotifierConfig,
        state: Arc<dyn StateRepository>,
        changes: Arc<dyn ChangeSource>,
        presenter: Arc<dyn NotificationPresenter>,
        windows: Arc<dyn WindowClients>,
    ) -> Result<Self, ConfigError> {
        let origin = config.origin_url()?;
        Ok(Self {
            state,
            changes,
            presenter,
            windows,
            clock: Arc::new(SystemClock),
            reason: Arc::new(DefaultReasonFormatter),
            urls: Arc::new(GerritUrlBuilder::new(&origin, config.dashboard_path.clone())),
        })
    }
}

/// One execution context of the notification engine.
pub struct NotificationWorker {
    context_id: Uuid,
    engine: Arc<CheckEngine>,
    router: Arc<ActivationRouter>,
}

impl NotificationWorker {
    pub fn new(config: &NotifierConfig, host: HostCapabilities) -> Self {
        let context_id = Uuid::new_v4();
        info!(
            "event=worker_start module=worker status=ok context={} throttle_interval_ms={}",
            context_id, config.throttle_interval_ms
        );
        let engine = CheckEngine {
            context_id,
            state: StateManager::new(host.state),
            changes: host.changes,
            presenter: host.presenter,
            clock: host.clock,
            reason: host.reason,
            urls: host.urls,
            throttle_interval_ms: config.throttle_interval_ms,
        };
        Self {
            context_id,
            engine: Arc::new(engine),
            router: Arc::new(ActivationRouter::new(host.windows)),
        }
    }

    pub fn context_id(&self) -> Uuid {
        self.context_id
    }

    pub fn engine(&self) -> &Arc<CheckEngine> {
        &self.engine
    }

    pub fn router(&self) -> &Arc<ActivationRouter> {
        &self.router
    }

    /// Registers the message and notification-click handlers.
    pub fn install(&self, dispatcher: &mut EventDispatcher) -> Result<(), DispatchError> {
        dispatcher.register_handler(
            EventKind::Message,
            Arc::new(CheckNotificationsHandler {
                engine: self.engine.clone(),
            }),
        )?;
        dispatcher.register_handler(
            EventKind::NotificationClick,
            Arc::new(NotificationClickHandler {
                router: self.router.clone(),
            }),
        )
    }
}

struct CheckNotificationsHandler {
    engine: Arc<CheckEngine>,
}

impl EventHandler for CheckNotificationsHandler {
    fn handle(&self, event: WorkerEvent) -> Option<HandlerTask> {
        let WorkerEvent::Message(payload) = event else {
            return None;
        };
        let Some(WorkerMessage::CheckNotifications(trigger)) = WorkerMessage::parse(&payload)
        else {
            debug!("event=dispatch module=worker status=skip reason=unknown_message");
            return None;
        };

        let engine = self.engine.clone();
        Some(
            async move {
                engine.run_cycle(&trigger.account).await;
            }
            .boxed(),
        )
    }
}

struct NotificationClickHandler {
    router: Arc<ActivationRouter>,
}

impl EventHandler for NotificationClickHandler {
    fn handle(&self, event: WorkerEvent) -> Option<HandlerTask> {
        let WorkerEvent::NotificationClick(activation) = event else {
            return None;
        };

        let router = self.router.clone();
        Some(
            async move {
                router.route(&activation).await;
            }
            .boxed(),
        )
    }
}
