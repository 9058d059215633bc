//! Networking modules for the storefront REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the auth calls behind the `AuthApi` seam and `types` defines
//! the JSON bodies exchanged with the server.

pub mod api;
pub mod types;
