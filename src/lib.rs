//! # booking-client
//!
//! Leptos + WASM frontend for the theatre ticket-booking site.
//!
//! The crate owns the client route table and the navigation guard that gates
//! page transitions by the session token and role marker kept in
//! `localStorage`. The guard is a UX layer: the booking API re-validates the
//! session and admin role on every protected endpoint.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod routing;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let level = config::GuardConfig::load().map_or(config::DEFAULT_LOG_LEVEL, |c| c.log_level);
    let _ = console_log::init_with_level(level);
    leptos::mount::hydrate_body(app::App);
}
