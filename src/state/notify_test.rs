use std::cell::RefCell;
use std::rc::Rc;

use super::*;

type Pending = Rc<RefCell<Vec<(u64, Box<dyn FnOnce()>)>>>;

/// Notifier whose timers queue up until the test fires them.
fn manual_notifier(duration_ms: u64) -> (Notifier, Pending) {
    let pending: Pending = Rc::new(RefCell::new(Vec::new()));
    let sink = pending.clone();
    let notifier = Notifier::with_scheduler(duration_ms, move |delay, done| sink.borrow_mut().push((delay, done)));
    (notifier, pending)
}

fn fire(pending: &Pending, index: usize) {
    let (_, done) = pending.borrow_mut().remove(index);
    done();
}

#[test]
fn notifier_starts_empty() {
    let notifier = Notifier::default();
    assert!(notifier.current().is_none());
}

#[test]
fn push_shows_visible_notification() {
    let notifier = Notifier::new(3000);
    let id = notifier.success("Login successful");
    let current = notifier.current().unwrap();
    assert_eq!(current.id, id);
    assert_eq!(current.message, "Login successful");
    assert_eq!(current.severity, Severity::Success);
    assert!(current.visible);
}

#[test]
fn newer_notification_replaces_current() {
    let notifier = Notifier::new(3000);
    let first = notifier.info("first");
    let second = notifier.error("second");
    assert_ne!(first, second);
    let current = notifier.current().unwrap();
    assert_eq!(current.id, second);
    assert_eq!(current.severity, Severity::Error);
}

#[test]
fn stale_expiry_does_not_hide_newer_notification() {
    let notifier = Notifier::new(3000);
    let first = notifier.info("first");
    let second = notifier.push(Severity::Warning, "second");
    notifier.expire(first);
    assert_eq!(notifier.current().map(|n| n.id), Some(second));
    notifier.expire(second);
    assert!(notifier.current().is_none());
}

// =============================================================
// Auto-dismiss
// =============================================================

#[test]
fn push_schedules_dismissal_after_configured_duration() {
    let (notifier, pending) = manual_notifier(3000);
    let id = notifier.success("saved");

    assert_eq!(pending.borrow().iter().map(|(delay, _)| *delay).collect::<Vec<_>>(), vec![3000]);
    assert_eq!(notifier.current().map(|n| n.id), Some(id));

    fire(&pending, 0);
    assert!(notifier.current().is_none());
}

#[test]
fn earlier_timer_leaves_newer_notification_up() {
    let (notifier, pending) = manual_notifier(1500);
    notifier.info("first");
    let second = notifier.error("second");
    assert_eq!(pending.borrow().len(), 2);

    fire(&pending, 0);
    assert_eq!(notifier.current().map(|n| n.id), Some(second));

    fire(&pending, 0);
    assert!(notifier.current().is_none());
}

#[test]
fn timer_after_notifier_dropped_is_harmless() {
    let (notifier, pending) = manual_notifier(3000);
    notifier.info("bye");
    drop(notifier);
    fire(&pending, 0);
}

#[test]
fn close_clears_current() {
    let notifier = Notifier::new(3000);
    notifier.info("bye");
    notifier.close();
    assert!(notifier.current().is_none());
    notifier.close();
}

#[test]
fn subscribers_see_every_change() {
    let notifier = Notifier::new(3000);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    notifier.subscribe(move |n| sink.borrow_mut().push(n.map(|n| n.message.clone())));

    let id = notifier.success("saved");
    notifier.expire(id + 100);
    notifier.expire(id);

    assert_eq!(*seen.borrow(), vec![Some("saved".to_owned()), None]);
}

#[test]
fn clones_share_the_slot() {
    let notifier = Notifier::new(3000);
    let other = notifier.clone();
    other.info("from elsewhere");
    assert_eq!(notifier.current().unwrap().message, "from elsewhere");
}

#[test]
fn severity_names_match_css_modifiers() {
    assert_eq!(Severity::Success.as_str(), "success");
    assert_eq!(Severity::Error.as_str(), "error");
    assert_eq!(Severity::Info.as_str(), "info");
    assert_eq!(Severity::Warning.as_str(), "warning");
}
