//! Session token store
//!
//! Owns the single active token, mirrors it into durable storage and keeps
//! the default `Authorization` header that every API request picks up.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::STORAGE_KEY_TOKEN;
use crate::storage::KeyValueStore;

/// Default `Authorization` header shared with the API client.
///
/// Only the session store writes it; readers get whatever the latest
/// token change produced.
#[derive(Debug, Clone, Default)]
pub struct AuthHeader(Arc<RwLock<Option<String>>>);

impl AuthHeader {
    /// Current header value, e.g. `Bearer abc`
    pub fn value(&self) -> Option<String> {
        self.0.read().clone()
    }

    fn recompute(&self, token: Option<&str>) {
        *self.0.write() = token.map(|t| format!("Bearer {}", t));
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    token: Arc<RwLock<Option<String>>>,
    header: AuthHeader,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Read the persisted token, if any, and derive the header from it
    pub fn restore(storage: S) -> Self {
        let token = storage.get(STORAGE_KEY_TOKEN).filter(|t| !t.is_empty());
        let header = AuthHeader::default();
        header.recompute(token.as_deref());

        if token.is_some() {
            tracing::debug!("Restored session token from storage");
        }

        Self {
            storage,
            token: Arc::new(RwLock::new(token)),
            header,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Replace the active token. An empty string counts as no token.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());

        match &token {
            Some(t) => self.storage.set(STORAGE_KEY_TOKEN, t),
            None => self.storage.remove(STORAGE_KEY_TOKEN),
        }
        self.header.recompute(token.as_deref());
        *self.token.write() = token;
    }

    /// Log out
    pub fn clear(&self) {
        self.set_token(None);
    }

    /// Handle to the derived request header
    pub fn auth_header(&self) -> AuthHeader {
        self.header.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn set_token_persists_and_updates_header() {
        let storage = MemoryStorage::new();
        let session = SessionStore::restore(storage.clone());
        let header = session.auth_header();

        assert!(!session.is_authenticated());
        assert_eq!(header.value(), None);

        session.set_token(Some("abc".to_string()));

        assert_eq!(session.token().as_deref(), Some("abc"));
        assert_eq!(storage.get(STORAGE_KEY_TOKEN).as_deref(), Some("abc"));
        assert_eq!(header.value().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn clear_removes_token_and_header() {
        let storage = MemoryStorage::new();
        let session = SessionStore::restore(storage.clone());
        session.set_token(Some("abc".to_string()));

        session.clear();

        assert_eq!(session.token(), None);
        assert_eq!(storage.get(STORAGE_KEY_TOKEN), None);
        assert_eq!(session.auth_header().value(), None);
    }

    #[test]
    fn restore_reads_token_written_before_reload() {
        let storage = MemoryStorage::new();
        SessionStore::restore(storage.clone()).set_token(Some("persisted".to_string()));

        let reloaded = SessionStore::restore(storage);

        assert_eq!(reloaded.token().as_deref(), Some("persisted"));
        assert_eq!(
            reloaded.auth_header().value().as_deref(),
            Some("Bearer persisted")
        );
    }

    #[test]
    fn empty_token_is_treated_as_logged_out() {
        let storage = MemoryStorage::new();
        let session = SessionStore::restore(storage.clone());
        session.set_token(Some("abc".to_string()));

        session.set_token(Some(String::new()));

        assert!(!session.is_authenticated());
        assert_eq!(storage.get(STORAGE_KEY_TOKEN), None);
    }
}
