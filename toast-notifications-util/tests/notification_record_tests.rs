//! Integration tests for building notification records from caller input

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use toast_notifications_util::{
    CloseReason, Notification, NotificationAction, NotificationId, NotificationInput,
    NotificationKind, NotifyOptions,
};

fn build(options: NotifyOptions) -> Notification {
    let input = NotificationInput::new(NotificationKind::Warning, "Disk", "Almost full")
        .with_options(options);
    Notification::from_input(NotificationId::generate(), input, 5000, 0)
}

#[test]
fn test_default_duration_applies_when_unset() {
    let n = build(NotifyOptions::default());
    assert_eq!(n.duration_ms, 5000);
    assert_eq!(n.auto_dismiss_after(), Some(Duration::from_millis(5000)));
}

#[test]
fn test_explicit_duration_wins_over_default() {
    let n = build(NotifyOptions::default().duration_ms(1200));
    assert_eq!(n.auto_dismiss_after(), Some(Duration::from_millis(1200)));
}

#[test]
fn test_persistent_ignores_duration() {
    let n = build(NotifyOptions::default().duration_ms(50).persistent());
    assert!(n.persistent);
    assert_eq!(n.auto_dismiss_after(), None);
}

#[test]
fn test_zero_duration_never_expires() {
    let n = build(NotifyOptions::default().duration_ms(0));
    assert!(!n.persistent);
    assert_eq!(n.auto_dismiss_after(), None);
}

#[test]
fn test_action_is_carried_and_runs() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let n = build(NotifyOptions::default().action(NotificationAction::new("Retry", move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })));

    let action = n.action.expect("action attached");
    assert_eq!(action.label, "Retry");
    action.invoke().expect("callback succeeds");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_panicking_action_reports_label() {
    let action = NotificationAction::new("Explode", || panic!("kaboom"));
    let err = action.invoke().unwrap_err();
    assert_eq!(err.label, "Explode");
    assert_eq!(err.message, "kaboom");
    assert!(err.to_string().contains("Explode"));
}

#[test]
fn test_every_kind_looks_different() {
    let icons: HashSet<_> = NotificationKind::ALL.iter().map(|k| k.icon_name()).collect();
    let colors: HashSet<_> = NotificationKind::ALL
        .iter()
        .map(|k| format!("{:?}", k.color()))
        .collect();
    assert_eq!(icons.len(), NotificationKind::ALL.len());
    assert_eq!(colors.len(), NotificationKind::ALL.len());
}

#[test]
fn test_close_reason_wire_values() {
    assert_eq!(CloseReason::Expired as u32, 1);
    assert_eq!(CloseReason::Dismissed as u32, 2);
    assert_eq!(CloseReason::ActionInvoked as u32, 3);
    assert_eq!(
        serde_json::to_string(&CloseReason::Replaced).unwrap(),
        "\"Replaced\""
    );
}
