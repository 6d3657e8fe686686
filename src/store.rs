//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use chassis_core::domain::AuthUser;
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Logged-in user, `None` before login or after logout
    pub user: Option<AuthUser>,
    /// Whether a session token is stored
    pub authenticated: bool,
    /// App version shown on Home
    pub version: String,
}

impl AppState {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Record a successful login or a restored session
pub fn store_sign_in(store: &AppStore, user: Option<AuthUser>) {
    store.user().set(user);
    store.authenticated().set(true);
}

pub fn store_sign_out(store: &AppStore) {
    store.user().set(None);
    store.authenticated().set(false);
}

/// Name to greet on Home
pub fn store_display_name(store: &AppStore) -> String {
    store
        .user()
        .get()
        .map(|u| u.username)
        .unwrap_or_else(|| "User".to_string())
}
