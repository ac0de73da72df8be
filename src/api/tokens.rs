//! Credential state for one client: the CSRF token (memory only) and the
//! session (memory plus the configured [`SessionStore`]).

use crate::session::{
    store::{SessionStore, StoreError},
    types::{Session, UserProfile},
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

pub struct TokenCache {
    csrf: RwLock<Option<SecretString>>,
    session: RwLock<Option<Session>>,
    store: Arc<dyn SessionStore>,
}

// A panic while holding one of these locks leaves a complete value behind,
// so poisoning is recovered rather than propagated.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl TokenCache {
    /// Builds the cache and hydrates the session from `store`. An unreadable
    /// store is logged and treated as "no session".
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let session = match store.load() {
            Ok(session) => session,
            Err(err) => {
                warn!("ignoring unreadable session: {err}");
                None
            }
        };

        Self {
            csrf: RwLock::new(None),
            session: RwLock::new(session),
            store,
        }
    }

    pub fn csrf_header(&self) -> Option<String> {
        read(&self.csrf)
            .as_ref()
            .map(|token| token.expose_secret().to_string())
    }

    pub fn set_csrf(&self, token: SecretString) {
        *write(&self.csrf) = Some(token);
    }

    pub fn authorization_header(&self) -> Option<String> {
        read(&self.session).as_ref().map(Session::bearer)
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        read(&self.session).clone()
    }

    /// Replaces the held session. The previous value is dropped, never merged.
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted; memory is updated
    /// regardless.
    pub fn replace_session(&self, session: Session) -> Result<(), StoreError> {
        let result = self.store.save(&session);
        *write(&self.session) = Some(session);
        result
    }

    /// Swaps in a refreshed token while keeping the identity snapshot.
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted.
    pub fn rotate_session(&self, mut session: Session) -> Result<(), StoreError> {
        if session.user.is_none() {
            session.user = read(&self.session)
                .as_ref()
                .and_then(|current| current.user.clone());
        }
        self.replace_session(session)
    }

    /// Attaches a freshly fetched profile to the held session.
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted.
    pub fn set_user(&self, user: UserProfile) -> Result<(), StoreError> {
        let updated = {
            let mut guard = write(&self.session);
            let Some(session) = guard.as_mut() else {
                return Ok(());
            };
            session.user = Some(user);
            session.clone()
        };
        self.store.save(&updated)
    }

    /// Drops the session from memory and storage.
    ///
    /// # Errors
    /// Returns an error if the stored session cannot be removed; memory is
    /// cleared regardless.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        *write(&self.session) = None;
        self.store.clear()
    }
}
