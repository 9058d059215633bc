//! # storefront
//!
//! Leptos + WASM client for the storefront dashboard. Product, supplier and
//! analytics data all live behind the external REST API; this crate owns the
//! browser-side session lifecycle, the auth gate that keeps the app inert until
//! a user is signed in, and the toast channel those flows report through.
//!
//! Everything outside `components`, `pages` and `app` is plain Rust and is
//! exercised on the host without the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed, which keeps logging working.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
