//! Maison storefront
//!
//! Leptos app rendered on Spin and hydrated in the browser. Server
//! functions in [`api`] proxy the commerce backend; [`state`] holds the
//! optimistic cart, wishlist and session shared by every page.

mod api;
mod app;
mod pages;
mod state;

#[cfg(feature = "ssr")]
mod backend;
#[cfg(feature = "ssr")]
mod server;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
