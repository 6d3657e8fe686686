//! Repository Layer - Core Traits
//!
//! The controller depends on these seams rather than on `reqwest` or
//! `localStorage` directly, so tests can drive it with in-memory fakes.

use std::rc::Rc;

use async_trait::async_trait;

use crate::domain::{ClientResult, PageQuery, Record};

/// A paginated collection on the backend
///
/// Futures are not `Send`: browser fetches run on the single UI thread.
#[async_trait(?Send)]
pub trait RecordSource {
    /// Run one listing request
    async fn fetch(&self, query: &PageQuery) -> ClientResult<Vec<Record>>;
}

#[async_trait(?Send)]
impl<T: RecordSource + ?Sized> RecordSource for Rc<T> {
    async fn fetch(&self, query: &PageQuery) -> ClientResult<Vec<Record>> {
        (**self).fetch(query).await
    }
}

/// Synchronous string storage (web `localStorage` or memory)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    fn remove(&self, key: &str) -> ClientResult<()>;
}
