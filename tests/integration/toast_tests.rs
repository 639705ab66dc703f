use std::sync::Arc;
use std::time::Duration;

use oxide_reduce::app::{
    ToastAction, ToastEnvironment, ToastReducer, ToastState, DISMISS_TIMER, TOAST_DURATION,
};
use oxide_reduce::{TestScheduler, TestStore};

fn toast_store() -> (TestStore<ToastReducer>, TestScheduler) {
    let scheduler = TestScheduler::new();
    let environment = ToastEnvironment {
        scheduler: Arc::new(scheduler.clone()),
    };
    (
        TestStore::new(ToastState::default(), ToastReducer, environment),
        scheduler,
    )
}

#[test]
fn given_shown_toast_should_hide_once_toast_duration_elapses() {
    let (mut store, scheduler) = toast_store();

    store.send(ToastAction::Show("Saved".to_string()));
    assert_eq!(store.state().text(), Some("Saved"));

    store.advance(&scheduler, TOAST_DURATION - Duration::from_millis(1));
    assert!(store.received().is_empty());
    assert_eq!(store.state().text(), Some("Saved"));

    store.advance(&scheduler, Duration::from_millis(1));
    assert_eq!(scheduler.now(), TOAST_DURATION);
    assert_eq!(store.received(), &[ToastAction::Expired(1)]);
    assert!(!store.state().is_showing());
    assert_eq!(scheduler.pending_timers(), 0);
}

#[test]
fn given_hidden_toast_when_hiding_again_should_stay_hidden() {
    let (mut store, _scheduler) = toast_store();

    store.send(ToastAction::Hide);
    store.send(ToastAction::Hide);

    assert_eq!(store.state(), &ToastState::default());
    assert!(store.received().is_empty());
    // Initial state plus one per reduction.
    assert_eq!(store.observer().count(), 3);
    store.observer().with_snapshots(|snapshots| {
        assert!(snapshots.iter().all(|state| *state == ToastState::default()));
    });
}

#[test]
fn given_shown_toast_when_hidden_explicitly_should_cancel_dismiss_timer() {
    let (mut store, scheduler) = toast_store();

    store.send(ToastAction::Show("Saved".to_string()));
    store.send(ToastAction::Hide);

    assert!(!store.state().is_showing());
    assert_eq!(scheduler.pending_timers(), 0);
    assert_eq!(store.cancellations().in_flight(DISMISS_TIMER), 0);

    store.advance(&scheduler, TOAST_DURATION * 2);
    assert!(store.received().is_empty());
}

#[test]
fn given_shown_toast_when_shown_again_should_restart_the_timer() {
    let (mut store, scheduler) = toast_store();

    store.send(ToastAction::Show("first".to_string()));
    store.advance(&scheduler, Duration::from_secs(2));
    store.send(ToastAction::Show("second".to_string()));

    assert_eq!(scheduler.pending_timers(), 1);
    assert_eq!(store.cancellations().in_flight(DISMISS_TIMER), 1);

    store.advance(&scheduler, Duration::from_secs(2));
    assert!(store.received().is_empty());
    assert_eq!(store.state().text(), Some("second"));

    store.advance(&scheduler, Duration::from_secs(1));
    assert_eq!(store.received(), &[ToastAction::Expired(2)]);
    assert!(!store.state().is_showing());
}

#[test]
fn given_expired_timer_queued_behind_new_show_should_keep_the_new_toast() {
    let (mut store, scheduler) = toast_store();

    store.send(ToastAction::Show("first".to_string()));
    store.emitter().emit(ToastAction::Show("second".to_string()));
    store.advance(&scheduler, TOAST_DURATION);

    assert_eq!(
        store.received(),
        &[
            ToastAction::Show("second".to_string()),
            ToastAction::Expired(1),
        ]
    );
    assert_eq!(store.state().text(), Some("second"));
    assert_eq!(store.state().generation(), 2);
    assert_eq!(scheduler.pending_timers(), 1);

    store.take_received();
    store.advance(&scheduler, TOAST_DURATION);

    assert_eq!(store.received(), &[ToastAction::Expired(2)]);
    assert!(!store.state().is_showing());
}

#[test]
fn given_expired_timer_queued_behind_hide_and_show_should_keep_the_new_toast() {
    let (mut store, scheduler) = toast_store();

    store.send(ToastAction::Show("first".to_string()));
    let emitter = store.emitter();
    emitter.emit(ToastAction::Hide);
    emitter.emit(ToastAction::Show("second".to_string()));
    store.advance(&scheduler, TOAST_DURATION);

    assert_eq!(store.state().text(), Some("second"));
    assert_eq!(scheduler.pending_timers(), 1);
}

#[test]
fn given_shown_toast_when_tapped_should_hide_immediately() {
    let (mut store, scheduler) = toast_store();

    store.send(ToastAction::Show("Saved".to_string()));
    store.send(ToastAction::Tapped);

    assert_eq!(store.received(), &[ToastAction::Hide]);
    assert!(!store.state().is_showing());
    assert_eq!(scheduler.pending_timers(), 0);

    store.advance(&scheduler, TOAST_DURATION);
    assert_eq!(store.received(), &[ToastAction::Hide]);
}

#[test]
fn given_pending_timer_when_torn_down_should_not_hide() {
    let (mut store, scheduler) = toast_store();

    store.send(ToastAction::Show("Saved".to_string()));
    store.teardown();
    store.advance(&scheduler, TOAST_DURATION);

    assert!(store.received().is_empty());
    assert_eq!(store.state().text(), Some("Saved"));
    assert_eq!(scheduler.pending_timers(), 0);
    assert_eq!(store.cancellations().in_flight(DISMISS_TIMER), 0);
}
