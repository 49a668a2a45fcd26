//! Session store port
//!
//! The engine requires atomic per-id create/get/update plus an event
//! lock that serializes "presenter answered" events for one session.
//! The backing technology is the adapter's concern.

use async_trait::async_trait;
use boardroom_domain::Session;
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;

/// Errors that can occur in the session store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Port for session persistence.
///
/// `update` persists the whole aggregate (turn appends ride along with
/// it) at the end of an event. `lock` must be acquired before reading a
/// session for a mutating event and held until its update lands, so no
/// two events for the same id interleave.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: Session) -> Result<(), StoreError>;

    async fn get(&self, id: &str) -> Result<Session, StoreError>;

    async fn update(&self, session: Session) -> Result<(), StoreError>;

    /// Acquire the per-session event lock
    async fn lock(&self, id: &str) -> OwnedMutexGuard<()>;
}
