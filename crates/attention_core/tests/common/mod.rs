#![allow(dead_code)]

use async_trait::async_trait;
use attention_core::db::open_db_in_memory;
use attention_core::{
    Account, AttentionEntry, ChangeSource, ChangeSummary, Clock, FetchError, HostCapabilities,
    NotificationIntent, NotificationPresenter, NotifierConfig, NotificationWorker,
    PresentationError, RoutingError, ShownNotification, SqliteStateRepository, StateRepository,
    TimestampMs, WindowClient, WindowClients, WorkerState,
};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ORIGIN: &str = "https://review.example";
pub const ACCOUNT_ID: &str = "1000096";

pub struct FixedClock(AtomicI64);

impl FixedClock {
    pub fn at(now_ms: TimestampMs) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(now_ms)))
    }

    pub fn set(&self, now_ms: TimestampMs) {
        self.0.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> TimestampMs {
        self.0.load(Ordering::SeqCst)
    }
}

/// Returns canned changes and records what the state store held mid-fetch.
pub struct FakeChangeSource {
    changes: Mutex<Result<Vec<ChangeSummary>, FetchError>>,
    state: Option<Arc<dyn StateRepository>>,
    pub calls: AtomicUsize,
    pub state_seen_during_fetch: Mutex<Vec<Option<WorkerState>>>,
}

impl FakeChangeSource {
    pub fn returning(changes: Vec<ChangeSummary>) -> Arc<Self> {
        Arc::new(Self::new(Ok(changes), None))
    }

    pub fn failing(error: FetchError) -> Arc<Self> {
        Arc::new(Self::new(Err(error), None))
    }

    pub fn observing(changes: Vec<ChangeSummary>, state: Arc<dyn StateRepository>) -> Arc<Self> {
        Arc::new(Self::new(Ok(changes), Some(state)))
    }

    fn new(
        changes: Result<Vec<ChangeSummary>, FetchError>,
        state: Option<Arc<dyn StateRepository>>,
    ) -> Self {
        Self {
            changes: Mutex::new(changes),
            state,
            calls: AtomicUsize::new(0),
            state_seen_during_fetch: Mutex::new(Vec::new()),
        }
    }

    pub fn set_changes(&self, changes: Vec<ChangeSummary>) {
        *self.changes.lock().unwrap() = Ok(changes);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChangeSource for FakeChangeSource {
    async fn fetch_attention_changes(
        &self,
        _account: &Account,
    ) -> Result<Vec<ChangeSummary>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(state) = &self.state {
            let seen = state.load_state().unwrap();
            self.state_seen_during_fetch.lock().unwrap().push(seen);
        }
        self.changes.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub shown: Mutex<Vec<NotificationIntent>>,
    pub fail_with: Option<PresentationError>,
}

impl RecordingPresenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self {
            shown: Mutex::new(Vec::new()),
            fail_with: Some(PresentationError::PermissionDenied),
        })
    }

    pub fn shown(&self) -> Vec<NotificationIntent> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPresenter for RecordingPresenter {
    async fn show_notification(
        &self,
        intent: &NotificationIntent,
    ) -> Result<(), PresentationError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.shown.lock().unwrap().push(intent.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeWindows {
    pub open: Mutex<Vec<WindowClient>>,
    pub focused: Mutex<Vec<String>>,
    pub opened: Mutex<Vec<String>>,
    pub fail_enumerate: bool,
    pub fail_focus: bool,
    pub open_returns_nothing: bool,
}

impl FakeWindows {
    pub fn with_open(urls: &[&str]) -> Self {
        let open = urls
            .iter()
            .enumerate()
            .map(|(index, url)| WindowClient {
                id: format!("w{index}"),
                url: url.to_string(),
            })
            .collect();
        Self {
            open: Mutex::new(open),
            ..Self::default()
        }
    }

    pub fn focused(&self) -> Vec<String> {
        self.focused.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl WindowClients for FakeWindows {
    async fn match_all_windows(&self) -> Result<Vec<WindowClient>, RoutingError> {
        if self.fail_enumerate {
            return Err(RoutingError::Enumerate("clients unavailable".to_string()));
        }
        Ok(self.open.lock().unwrap().clone())
    }

    async fn open_window(&self, url: &str) -> Result<Option<WindowClient>, RoutingError> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.open_returns_nothing {
            return Ok(None);
        }
        let client = WindowClient {
            id: format!("new-{}", self.opened.lock().unwrap().len()),
            url: url.to_string(),
        };
        self.open.lock().unwrap().push(client.clone());
        Ok(Some(client))
    }

    async fn focus(&self, client: &WindowClient) -> Result<(), RoutingError> {
        if self.fail_focus {
            return Err(RoutingError::Focus("window gone".to_string()));
        }
        self.focused.lock().unwrap().push(client.id.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotification {
    pub closed: AtomicBool,
}

impl FakeNotification {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl ShownNotification for FakeNotification {
    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub fn memory_state() -> Arc<SqliteStateRepository> {
    Arc::new(SqliteStateRepository::new(open_db_in_memory().unwrap(), ORIGIN))
}

pub fn config(throttle_interval_ms: u64) -> NotifierConfig {
    let mut config = NotifierConfig::for_origin(ORIGIN);
    config.throttle_interval_ms = throttle_interval_ms;
    config
}

pub fn worker(
    throttle_interval_ms: u64,
    state: Arc<dyn StateRepository>,
    changes: Arc<dyn ChangeSource>,
    presenter: Arc<dyn NotificationPresenter>,
    clock: Arc<dyn Clock>,
) -> NotificationWorker {
    let config = config(throttle_interval_ms);
    let mut host = HostCapabilities::with_defaults(
        &config,
        state,
        changes,
        presenter,
        Arc::new(FakeWindows::default()),
    )
    .unwrap();
    host.clock = clock;
    NotificationWorker::new(&config, host)
}

pub fn change(id: &str, number: u64, updated_at_ms: TimestampMs) -> ChangeSummary {
    let mut change = ChangeSummary::new(id, format!("Subject {id}")).with_attention(
        ACCOUNT_ID,
        AttentionEntry::new("Reviewer was added", updated_at_ms),
    );
    change.project = Some("core".to_string());
    change.number = Some(number);
    change
}

pub fn account() -> Account {
    Account::with_id(ACCOUNT_ID)
}
