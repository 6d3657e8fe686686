//! Backend Command Wrappers
//!
//! Frontend bindings to the REST backend, organized by domain. Every
//! wrapper collapses errors to the message the screen shows.

mod auth;
mod cmh;
mod document;
mod listing;

use std::rc::Rc;

use chassis_core::repository::{ApiClient, KeyValueStore, SessionManager};
use chassis_core::ClientConfig;
use wasm_bindgen::JsValue;

// Re-export all public items
pub use auth::*;
pub use cmh::*;
pub use document::*;
pub use listing::*;

thread_local! {
    static CLIENT: ApiClient = ApiClient::new(load_config(), SessionManager::new(session_store()));
}

/// Shared API client; cheap to clone
pub fn client() -> ApiClient {
    CLIENT.with(ApiClient::clone)
}

pub fn config() -> ClientConfig {
    CLIENT.with(|c| c.config().clone())
}

/// JSON injected by the host page as `window.CHASSIS_CONFIG`
fn page_config() -> Option<ClientConfig> {
    let window = web_sys::window()?;
    let raw = js_sys::Reflect::get(&window, &JsValue::from_str("CHASSIS_CONFIG"))
        .ok()?
        .as_string()?;
    match ClientConfig::from_json(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            log::error!("Ignoring page config: {}", e);
            None
        }
    }
}

/// Page config if present, else defaults with the backend location
/// overridable at build time
fn load_config() -> ClientConfig {
    if let Some(config) = page_config() {
        return config;
    }
    let mut config = ClientConfig::default();
    if let Some(url) = option_env!("CHASSIS_API_BASE_URL") {
        config = config.with_api_base_url(url);
    }
    if let Some(url) = option_env!("CHASSIS_ASSET_BASE_URL") {
        config = config.with_asset_base_url(url);
    }
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::error!("Ignoring build-time config: {}", e);
            ClientConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn session_store() -> Rc<dyn KeyValueStore> {
    Rc::new(chassis_core::repository::BrowserStore)
}

#[cfg(not(target_arch = "wasm32"))]
fn session_store() -> Rc<dyn KeyValueStore> {
    Rc::new(chassis_core::repository::MemoryStore::new())
}
