//! # client
//!
//! Leptos + WASM frontend for the admin portal: the login page (credential
//! matching and password changes) and the dashboard gated on the locally
//! stored session.
//!
//! The authentication rules live in the `gate` crate; this crate wires them to
//! browser storage, the Firestore REST API, navigation, and the view layer.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
