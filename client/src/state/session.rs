//! Credential session for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! A [`Session`] is created once in `App` and handed to the API client and
//! route components through Leptos context. It is the only owner of the
//! bearer credential: login begins it, logout or an auth rejection ends it.
//!
//! DESIGN
//! ======
//! Persistence goes through [`CredentialStore`] so the same session logic
//! runs against browser localStorage in the app and an in-memory slot on the
//! server and in tests.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::util::storage;

/// localStorage slot holding the credential. Absence means "not logged in".
pub const CREDENTIAL_STORAGE_KEY: &str = "token";

/// Opaque bearer token. Never blank; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token, trimming surrounding whitespace.
    /// Returns `None` if nothing is left.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("could not store the access token")]
    StoreFailed,
}

/// Single-slot persistence for the credential string.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<String>;
    /// Returns `false` if the value was not persisted.
    fn save(&self, value: &str) -> bool;
    fn clear(&self);
}

/// Process-local store used on the server and in tests.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, value: &str) -> bool {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.to_owned());
        true
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// localStorage-backed store. Outside the browser every read misses.
#[derive(Default)]
pub struct BrowserStore;

impl CredentialStore for BrowserStore {
    fn load(&self) -> Option<String> {
        storage::load_item(CREDENTIAL_STORAGE_KEY)
    }

    fn save(&self, value: &str) -> bool {
        storage::save_item(CREDENTIAL_STORAGE_KEY, value)
    }

    fn clear(&self) {
        storage::remove_item(CREDENTIAL_STORAGE_KEY);
    }
}

/// Explicit credential lifecycle shared via context.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    /// Session persisted in browser localStorage when hydrated, in memory
    /// during SSR.
    #[must_use]
    pub fn browser() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self::new(Arc::new(BrowserStore))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::in_memory()
        }
    }

    /// Current credential, if a session is active.
    /// A blank value left in storage counts as no session.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.store.load().and_then(Credential::new)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.credential().is_some()
    }

    /// Start a session, replacing any previous credential.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StoreFailed`] if the store refused the write;
    /// the session is left inactive.
    pub fn begin(&self, credential: Credential) -> Result<(), SessionError> {
        if self.store.save(credential.as_str()) {
            return Ok(());
        }
        self.store.clear();
        Err(SessionError::StoreFailed)
    }

    /// Destroy the session. Safe to call when none is active.
    pub fn end(&self) {
        self.store.clear();
    }
}
