//! Routes a notification click to an existing or newly opened window.
//!
//! # Invariants
//! - The notification is closed before anything else, whatever happens next.
//! - At most one window is opened per activation.
//! - Routing failures are logged and swallowed.

use crate::host::{RoutingError, WindowClients};
use crate::worker::event::NotificationActivation;
use log::{info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Activation carried no target URL.
    NoTarget,
    FocusedExisting,
    /// `focused` is false when the host opened a window it could not hand back.
    OpenedNew { focused: bool },
    Failed,
}

pub struct ActivationRouter {
    windows: Arc<dyn WindowClients>,
}

impl ActivationRouter {
    pub fn new(windows: Arc<dyn WindowClients>) -> Self {
        Self { windows }
    }

    pub async fn route(&self, activation: &NotificationActivation) -> RouteOutcome {
        activation.notification.close();

        let Some(target_url) = activation.data.target_url() else {
            info!("event=activation_route module=router status=skip reason=no_target");
            return RouteOutcome::NoTarget;
        };

        match self.focus_or_open(target_url).await {
            Ok(outcome) => {
                info!(
                    "event=activation_route module=router status=ok outcome={:?}",
                    outcome
                );
                outcome
            }
            Err(err) => {
                warn!(
                    "event=activation_route module=router status=error error_code=routing_failed error={}",
                    err
                );
                RouteOutcome::Failed
            }
        }
    }

    async fn focus_or_open(&self, target_url: &str) -> Result<RouteOutcome, RoutingError> {
        let windows = self.windows.match_all_windows().await?;
        if let Some(existing) = windows.iter().find(|window| window.url == target_url) {
            self.windows.focus(existing).await?;
            return Ok(RouteOutcome::FocusedExisting);
        }

        match self.windows.open_window(target_url).await? {
            Some(opened) => {
                self.windows.focus(&opened).await?;
                Ok(RouteOutcome::OpenedNew { focused: true })
            }
            None => Ok(RouteOutcome::OpenedNew { focused: false }),
        }
    }
}
