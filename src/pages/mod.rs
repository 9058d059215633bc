//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates session work to
//! the store and the submit flows in `state`.

pub mod home;
pub mod reset_password;
