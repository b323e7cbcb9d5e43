use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use shared_models::auth::Session;
use shared_models::error::ClientError;

/// In-memory session storage. Created on login success, cleared on explicit
/// logout or when any authenticated endpoint answers 401/403.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // The stored Option<Session> stays consistent across any single write,
    // so a poisoned lock is still safe to read through.
    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, session: Session) {
        debug!("Storing session for role: {}", session.role.as_str());
        *self.write() = Some(session);
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Bearer token for authenticated requests.
    pub fn token(&self) -> Result<String, ClientError> {
        self.read()
            .as_ref()
            .map(|session| session.access_token.clone())
            .ok_or_else(|| ClientError::Auth("Not logged in".to_string()))
    }

    pub fn clear(&self) {
        debug!("Clearing session");
        *self.write() = None;
    }

    /// Auth failures from any endpoint invalidate the stored session.
    pub fn clear_if_unauthorized(&self, err: &ClientError) {
        if err.is_auth() {
            self.clear();
        }
    }
}
