pub mod app;
pub mod client;
pub mod components;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod prompt;
pub mod services;
pub mod session;
pub mod state;
pub mod types;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
