//! Home Screen Component
//!
//! Greeting, version and the entry points to the three listings.

use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::models::{ListingKind, Screen};
use crate::store::{store_display_name, store_sign_out, use_app_store, AppStateStoreFields};

const MENU: [(ListingKind, &str); 3] = [
    (ListingKind::WeightCerts, "Weight Certificates"),
    (ListingKind::Plans, "Plans"),
    (ListingKind::ChassisHistory, "Chassis Movement History"),
];

#[component]
pub fn HomeScreen() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let logout = move |_| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Are you sure you want to logout?").ok())
            .unwrap_or(true);
        if !confirmed { return; }
        if let Err(e) = commands::logout() {
            log::error!("Logout failed: {}", e);
        }
        store_sign_out(&store);
        ctx.replace(Screen::Login);
    };

    view! {
        <div class="home-screen">
            <header class="home-header">
                <div class="home-greeting">
                    <span class="greeting">"Welcome back,"</span>
                    <span class="username">{move || store_display_name(&store)}</span>
                </div>
                <button class="logout-btn" title="Logout" on:click=logout>"Logout"</button>
            </header>

            <nav class="home-menu">
                {MENU.into_iter().map(|(kind, label)| view! {
                    <button class="menu-card" on:click=move |_| ctx.navigate(Screen::Listing(kind))>
                        {label}
                    </button>
                }).collect_view()}
            </nav>

            <p class="version">{move || store.version().get()}</p>
        </div>
    }
}
