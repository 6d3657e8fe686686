//! Session Persistence
//!
//! `SessionManager` stores the bearer token and user identity through any
//! `KeyValueStore`. The browser build injects `BrowserStore`; tests and
//! native tools use `MemoryStore`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::traits::KeyValueStore;
use crate::domain::{AuthUser, ClientError, ClientResult, Session};

pub const TOKEN_KEY: &str = "userToken";
pub const USER_NAME_KEY: &str = "userName";
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    fn storage() -> ClientResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| ClientError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| ClientError::Storage("localStorage unavailable".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }
}

/// Session semantics over a key-value store
#[derive(Clone)]
pub struct SessionManager {
    store: Rc<dyn KeyValueStore>,
}

impl SessionManager {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }

    pub fn token(&self) -> ClientResult<Option<String>> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Token for an authenticated request
    pub fn require_token(&self) -> ClientResult<String> {
        self.token()?.ok_or(ClientError::Unauthenticated)
    }

    pub fn user(&self) -> ClientResult<Option<AuthUser>> {
        let id = self.store.get(USER_ID_KEY)?;
        let username = self.store.get(USER_NAME_KEY)?;
        Ok(match (id, username) {
            (Some(id), Some(username)) => Some(AuthUser { id, username }),
            _ => None,
        })
    }

    pub fn session(&self) -> ClientResult<Option<Session>> {
        match self.token()? {
            Some(token) => Ok(Some(Session::new(token, self.user()?))),
            None => Ok(None),
        }
    }

    pub fn save(&self, session: &Session) -> ClientResult<()> {
        self.store.set(TOKEN_KEY, &session.token)?;
        match &session.user {
            Some(user) => {
                self.store.set(USER_ID_KEY, &user.id)?;
                self.store.set(USER_NAME_KEY, &user.username)?;
            }
            None => {
                self.store.remove(USER_ID_KEY)?;
                self.store.remove(USER_NAME_KEY)?;
            }
        }
        log::info!("Session stored for {}", session.username().unwrap_or("unknown user"));
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_ID_KEY)?;
        self.store.remove(USER_NAME_KEY)?;
        Ok(())
    }

    /// Storage failures count as logged out
    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser { id: "7".into(), username: "eunice".into() }
    }

    #[test]
    fn test_save_and_read_session() {
        let store = Rc::new(MemoryStore::new());
        let sessions = SessionManager::new(store.clone());
        sessions.save(&Session::new("tok", Some(user()))).unwrap();

        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
        assert_eq!(store.get(USER_NAME_KEY).unwrap().as_deref(), Some("eunice"));
        let session = sessions.session().unwrap().unwrap();
        assert_eq!(session.username(), Some("eunice"));
        assert!(sessions.is_authenticated());
    }

    #[test]
    fn test_clear_session() {
        let sessions = SessionManager::in_memory();
        sessions.save(&Session::new("tok", Some(user()))).unwrap();
        sessions.clear().unwrap();

        assert!(!sessions.is_authenticated());
        assert_eq!(sessions.session().unwrap(), None);
        assert_eq!(sessions.user().unwrap(), None);
        assert_eq!(sessions.require_token(), Err(ClientError::Unauthenticated));
    }

    #[test]
    fn test_empty_token_is_logged_out() {
        let store = Rc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "").unwrap();
        let sessions = SessionManager::new(store);
        assert!(!sessions.is_authenticated());
    }
}
