//! Single-slot toast channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Session operations and form submissions push user-visible messages here;
//! the `Toast` component renders whatever is current. At most one
//! notification is visible and a newer one replaces it.
//!
//! Every push gets a fresh id. Auto-dismiss timers close only the id they were
//! started for, so a stale timer never hides a newer message.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::DEFAULT_TOAST_MS;

/// Visual intent of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub visible: bool,
}

type Listener = Rc<dyn Fn(Option<&Notification>)>;

/// Runs a callback once, after the given number of milliseconds.
type Scheduler = Rc<dyn Fn(u64, Box<dyn FnOnce()>)>;

struct Slot {
    current: Option<Notification>,
    next_id: u64,
    duration_ms: u64,
    listeners: Vec<Listener>,
    schedule: Scheduler,
}

/// Cloneable handle to the process-wide notification slot.
#[derive(Clone)]
pub struct Notifier {
    inner: Rc<RefCell<Slot>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_MS)
    }
}

impl Notifier {
    /// Notifier whose auto-dismiss runs on the browser's timers.
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        Self::with_scheduler(duration_ms, browser_timer)
    }

    /// Notifier that hands every auto-dismiss to `schedule` as
    /// `(delay_ms, callback)`.
    #[must_use]
    pub fn with_scheduler(duration_ms: u64, schedule: impl Fn(u64, Box<dyn FnOnce()>) + 'static) -> Self {
        let slot = Slot {
            current: None,
            next_id: 1,
            duration_ms,
            listeners: Vec::new(),
            schedule: Rc::new(schedule),
        };
        Self { inner: Rc::new(RefCell::new(slot)) }
    }

    /// Replace the visible notification and arm its auto-dismiss timer.
    pub fn push(&self, severity: Severity, message: impl Into<String>) -> u64 {
        let (id, duration_ms) = {
            let mut slot = self.inner.borrow_mut();
            let id = slot.next_id;
            slot.next_id += 1;
            slot.current = Some(Notification { id, message: message.into(), severity, visible: true });
            (id, slot.duration_ms)
        };
        self.emit();
        self.arm_timer(id, duration_ms);
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(Severity::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(Severity::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(Severity::Info, message)
    }

    /// Explicit close from the toast's close button.
    pub fn close(&self) {
        let closed = self.inner.borrow_mut().current.take().is_some();
        if closed {
            self.emit();
        }
    }

    /// Timer expiry for notification `id`; ignored once a newer one is showing.
    pub fn expire(&self, id: u64) {
        let expired = {
            let mut slot = self.inner.borrow_mut();
            if slot.current.as_ref().is_some_and(|n| n.id == id) {
                slot.current = None;
                true
            } else {
                false
            }
        };
        if expired {
            self.emit();
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.inner.borrow().current.clone()
    }

    /// Call `listener` with the visible notification after every change.
    pub fn subscribe(&self, listener: impl Fn(Option<&Notification>) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    fn emit(&self) {
        let (current, listeners) = {
            let slot = self.inner.borrow();
            (slot.current.clone(), slot.listeners.clone())
        };
        for listener in &listeners {
            listener(current.as_ref());
        }
    }

    fn arm_timer(&self, id: u64, duration_ms: u64) {
        let slot = Rc::downgrade(&self.inner);
        let schedule = self.inner.borrow().schedule.clone();
        schedule(
            duration_ms,
            Box::new(move || {
                if let Some(inner) = slot.upgrade() {
                    Notifier { inner }.expire(id);
                }
            }),
        );
    }
}

fn browser_timer(duration_ms: u64, done: Box<dyn FnOnce()>) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let millis = u32::try_from(duration_ms).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
        done();
    });
    #[cfg(not(feature = "csr"))]
    {
        // No timers on the host; toasts stay until closed or replaced.
        let _ = (duration_ms, done);
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").field("current", &self.current()).finish_non_exhaustive()
    }
}
