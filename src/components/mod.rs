//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the auth snapshot and toast slot from Leptos context and
//! act on the session only through the store handle `app::use_session` returns.

pub mod auth_gate;
pub mod auth_modal;
pub mod toast;
