//! Chassis Records Frontend Entry Point

mod models;
mod commands;
mod context;
mod store;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("chassis-records") {
        web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
    }
    log::info!("Starting chassis records client");
    mount_to_body(App);
}
