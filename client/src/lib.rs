//! # client
//!
//! Leptos + WASM frontend for Harita, a map-sharing application.
//!
//! This crate contains the four route pages, the map view bridging
//! MapLibre GL JS, page-local state, and the HTTP clients for the backend
//! API, the identity provider, file storage, and PMTiles archives. The pure
//! model it renders (style rules, bounds, property tables, wire types)
//! lives in the `harita` crate.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
