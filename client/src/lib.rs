//! # client
//!
//! Leptos + WASM frontend for the profile dashboard.
//!
//! This crate contains the pages, the credential session, and the API client
//! that attaches the session's bearer token to outbound requests. The server
//! crate renders it via SSR; the `hydrate` feature builds the browser bundle.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
