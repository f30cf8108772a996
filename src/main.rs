mod app;
mod components;
mod config;
mod core;
mod models;
mod utils;

use leptos::logging::error;
use leptos::prelude::Owner;

fn main() {
    console_error_panic_hook::set_once();

    let owner = Owner::new();
    if let Err(e) = owner.with(app::boot) {
        error!("listing page not bound: {}", e);
    }
    // Page state lives until the next navigation.
    std::mem::forget(owner);
}
