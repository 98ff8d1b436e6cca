//! Host-provided capabilities injected into the engine.
//!
//! # Responsibility
//! - Name every primitive the engine needs from its host (fetch, presentation,
//!   window routing, clock) as an explicit trait object.
//! - Ship default implementations for the pure collaborators (clock, reason
//!   text, URL construction).
//!
//! # Invariants
//! - Engine code never reaches host primitives except through these traits.

pub mod clock;
pub mod error;
pub mod reason;
pub mod urls;

use crate::model::account::Account;
use crate::model::change::ChangeSummary;
use crate::model::intent::NotificationIntent;
use async_trait::async_trait;

pub use clock::{Clock, SystemClock};
pub use error::{FetchError, PresentationError, RoutingError};
pub use reason::{DefaultReasonFormatter, ReasonFormatter};
pub use urls::{GerritUrlBuilder, UrlBuilder, NOTIFICATION_USP};

/// Outbound fetch of candidate items awaiting the account's attention.
///
/// Returns unfiltered candidates; relevance filtering stays in the engine.
#[async_trait]
pub trait ChangeSource: Send + Sync {
    async fn fetch_attention_changes(
        &self,
        account: &Account,
    ) -> Result<Vec<ChangeSummary>, FetchError>;
}

/// Presents one notification (title, body, data) to the user.
#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    async fn show_notification(&self, intent: &NotificationIntent)
        -> Result<(), PresentationError>;
}

/// Handle to a notification the user has activated.
pub trait ShownNotification: Send + Sync {
    fn close(&self);
}

/// One open window of the same origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClient {
    pub id: String,
    pub url: String,
}

/// Window enumeration, creation and focusing.
#[async_trait]
pub trait WindowClients: Send + Sync {
    async fn match_all_windows(&self) -> Result<Vec<WindowClient>, RoutingError>;
    /// Returns `None` when the host opened nothing it can hand back.
    async fn open_window(&self, url: &str) -> Result<Option<WindowClient>, RoutingError>;
    async fn focus(&self, client: &WindowClient) -> Result<(), RoutingError>;
}
