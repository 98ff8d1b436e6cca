//! Explicit event dispatch table.
//!
//! # Invariants
//! - At most one handler per `EventKind`.
//! - Every task a handler returns is handed to the host's lifetime extender
//!   before `dispatch` returns.

use crate::worker::event::{EventKind, WorkerEvent};
use futures_util::future::BoxFuture;
use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Asynchronous work started by one event.
pub type HandlerTask = BoxFuture<'static, ()>;

/// Handles one kind of event, optionally returning work the host must await.
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: WorkerEvent) -> Option<HandlerTask>;
}

/// Host contract: keep the execution context alive until `task` settles.
pub trait LifetimeExtender {
    fn wait_until(&self, task: HandlerTask);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    DuplicateHandler(EventKind),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateHandler(kind) => {
                write!(f, "handler already registered for {}", kind.as_str())
            }
        }
    }
}

impl Error for DispatchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No handler registered for the event kind.
    Unhandled,
    /// The handler accepted the event but had nothing to do.
    Ignored,
    /// A task was handed to the lifetime extender.
    Scheduled,
}

#[derive(Default)]
pub struct EventDispatcher {
    handlers: BTreeMap<EventKind, Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handler(
        &mut self,
        kind: EventKind,
        handler: Arc<dyn EventHandler>,
    ) -> Result<(), DispatchError> {
        if self.handlers.contains_key(&kind) {
            return Err(DispatchError::DuplicateHandler(kind));
        }
        self.handlers.insert(kind, handler);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn dispatch(&self, event: WorkerEvent, lifetime: &dyn LifetimeExtender) -> DispatchOutcome {
        let kind = event.kind();
        let Some(handler) = self.handlers.get(&kind) else {
            debug!(
                "event=dispatch module=worker status=skip reason=no_handler kind={}",
                kind.as_str()
            );
            return DispatchOutcome::Unhandled;
        };

        match handler.handle(event) {
            Some(task) => {
                lifetime.wait_until(task);
                debug!(
                    "event=dispatch module=worker status=ok kind={} scheduled=true",
                    kind.as_str()
                );
                DispatchOutcome::Scheduled
            }
            None => {
                debug!(
                    "event=dispatch module=worker status=skip reason=ignored kind={}",
                    kind.as_str()
                );
                DispatchOutcome::Ignored
            }
        }
    }
}
