//! Repository Layer
//!
//! Data access abstractions and implementations: the REST client and
//! session persistence.

mod traits;
mod api;
mod endpoints;
mod session_store;

pub use traits::{KeyValueStore, RecordSource};
pub use api::ApiClient;
pub use endpoints::{ChildCollection, DocumentKind, CHILD_COLLECTIONS, FILES, MOVEMENTS, QUOTATIONS, SALES_ORDERS};
pub use session_store::{MemoryStore, SessionManager, TOKEN_KEY, USER_ID_KEY, USER_NAME_KEY};

#[cfg(target_arch = "wasm32")]
pub use session_store::BrowserStore;
