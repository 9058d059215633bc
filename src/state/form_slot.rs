//! Access to form state that may disappear while a request is in flight.
//!
//! Submit flows hold a [`FormSlot`] instead of the form itself. When the
//! component owning the form unmounts, `with_form` returns `None` and the
//! flow drops the late response instead of touching dead state.

#[cfg(test)]
#[path = "form_slot_test.rs"]
mod form_slot_test;

use std::cell::RefCell;
use std::rc::Weak;

use leptos::prelude::*;

pub trait FormSlot<F> {
    /// Run `f` against the form, or return `None` if it no longer exists.
    fn with_form<R>(&self, f: impl FnOnce(&mut F) -> R) -> Option<R>;
}

impl<F> FormSlot<F> for Weak<RefCell<F>> {
    fn with_form<R>(&self, f: impl FnOnce(&mut F) -> R) -> Option<R> {
        let form = self.upgrade()?;
        let mut form = form.borrow_mut();
        Some(f(&mut form))
    }
}

impl<F> FormSlot<F> for RwSignal<F>
where
    F: Send + Sync + 'static,
{
    fn with_form<R>(&self, f: impl FnOnce(&mut F) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Identifies one submission. Mode changes and newer submissions retire
/// older tickets, so a late response cannot clear a newer `submitting` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket(pub(crate) u64);

/// Why a submit click issued no request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blocked {
    /// A request from this form is still outstanding.
    Busy,
    /// Local validation failed; errors are now shown inline.
    Invalid,
}
