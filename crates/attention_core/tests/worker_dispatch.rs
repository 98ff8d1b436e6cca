mod common;

use attention_core::{
    DispatchError, DispatchOutcome, EventDispatcher, EventKind, NotificationActivation,
    NotificationData, StateRepository, TaskTracker, WorkerEvent, WorkerState,
    CHECK_NOTIFICATIONS_MESSAGE,
};
use common::{
    change, memory_state, worker, FakeChangeSource, FakeNotification, FixedClock,
    RecordingPresenter, ACCOUNT_ID,
};
use serde_json::json;
use std::sync::Arc;

fn trigger() -> WorkerEvent {
    WorkerEvent::Message(json!({
        "type": CHECK_NOTIFICATIONS_MESSAGE,
        "account": {"_account_id": ACCOUNT_ID.parse::<u64>().unwrap()}
    }))
}

#[tokio::test]
async fn trigger_message_runs_one_cycle_under_lifetime_extension() {
    let state = memory_state();
    let source = FakeChangeSource::returning(vec![change("b", 2, 2000)]);
    let presenter = RecordingPresenter::new();
    let worker = worker(
        5000,
        state.clone(),
        source.clone(),
        presenter.clone(),
        FixedClock::at(9000),
    );
    let mut dispatcher = EventDispatcher::new();
    worker.install(&mut dispatcher).unwrap();
    assert_eq!(dispatcher.len(), 2);

    let tracker = TaskTracker::current().expect("inside tokio runtime");
    assert_eq!(
        dispatcher.dispatch(trigger(), &tracker),
        DispatchOutcome::Scheduled
    );
    assert_eq!(tracker.settle_all().await, 1);

    assert_eq!(source.call_count(), 1);
    assert_eq!(presenter.shown().len(), 1);
    assert_eq!(state.load_state().unwrap(), Some(WorkerState::new(9000)));
}

#[tokio::test]
async fn rapid_repeated_triggers_collapse_into_one_fetch() {
    let source = FakeChangeSource::returning(vec![change("b", 2, 2000)]);
    let presenter = RecordingPresenter::new();
    let worker = worker(
        5000,
        memory_state(),
        source.clone(),
        presenter.clone(),
        FixedClock::at(9000),
    );
    let mut dispatcher = EventDispatcher::new();
    worker.install(&mut dispatcher).unwrap();
    let tracker = TaskTracker::current().expect("inside tokio runtime");

    for _ in 0..3 {
        dispatcher.dispatch(trigger(), &tracker);
        tracker.settle_all().await;
    }

    assert_eq!(source.call_count(), 1);
    assert_eq!(presenter.shown().len(), 1);
}

#[tokio::test]
async fn unknown_messages_are_ignored() {
    let source = FakeChangeSource::returning(vec![change("b", 2, 2000)]);
    let worker = worker(
        5000,
        memory_state(),
        source.clone(),
        RecordingPresenter::new(),
        FixedClock::at(9000),
    );
    let mut dispatcher = EventDispatcher::new();
    worker.install(&mut dispatcher).unwrap();
    let tracker = TaskTracker::current().expect("inside tokio runtime");

    let outcome = dispatcher.dispatch(WorkerEvent::Message(json!({"type": "refresh"})), &tracker);

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(tracker.pending(), 0);
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn notification_click_is_routed() {
    let worker = worker(
        5000,
        memory_state(),
        FakeChangeSource::returning(Vec::new()),
        RecordingPresenter::new(),
        FixedClock::at(9000),
    );
    let mut dispatcher = EventDispatcher::new();
    worker.install(&mut dispatcher).unwrap();
    let tracker = TaskTracker::current().expect("inside tokio runtime");
    let notification = Arc::new(FakeNotification::default());

    let outcome = dispatcher.dispatch(
        WorkerEvent::NotificationClick(NotificationActivation {
            notification: notification.clone(),
            data: NotificationData {
                url: Some("https://review.example/dashboard/self".to_string()),
            },
        }),
        &tracker,
    );
    tracker.settle_all().await;

    assert_eq!(outcome, DispatchOutcome::Scheduled);
    assert!(notification.is_closed());
}

#[test]
fn installing_twice_is_rejected() {
    let worker = worker(
        5000,
        memory_state(),
        FakeChangeSource::returning(Vec::new()),
        RecordingPresenter::new(),
        FixedClock::at(0),
    );
    let mut dispatcher = EventDispatcher::new();
    worker.install(&mut dispatcher).unwrap();
    let err = worker.install(&mut dispatcher).unwrap_err();
    assert_eq!(
        err,
        DispatchError::DuplicateHandler(EventKind::Message)
    );
}
