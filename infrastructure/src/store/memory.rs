//! In-memory session store

use async_trait::async_trait;
use boardroom_application::ports::store::{SessionStore, StoreError};
use boardroom_domain::Session;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

/// Process-local session store.
///
/// Sessions live in a map guarded by an async mutex; per-session event
/// locks live in a separate map so acquiring one never blocks access to
/// other sessions.
pub struct InMemorySessionStore {
    sessions: tokio::sync::Mutex<HashMap<String, Session>>,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: tokio::sync::Mutex::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().await;
        let id = session.id().to_string();
        if sessions.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        sessions.insert(id, session);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Session, StoreError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update(&self, session: Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().await;
        let id = session.id().to_string();
        if !sessions.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        sessions.insert(id, session);
        Ok(())
    }

    async fn lock(&self, id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("lock map poisoned");
            Arc::clone(
                locks
                    .entry(id.to_string())
                    .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}
