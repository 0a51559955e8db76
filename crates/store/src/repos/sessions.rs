//! Login session repository.

use crate::error::StoreResult;
use crate::models::SessionRow;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

/// Repository for login session operations.
#[async_trait]
pub trait SessionRepo: Send + Sync {
    /// Create a new session.
    async fn create_session(&self, session: &SessionRow) -> StoreResult<()>;

    /// Look up a session by token hash.
    async fn get_session_by_hash(&self, token_hash: &str) -> StoreResult<Option<SessionRow>>;

    /// Revoke a session.
    async fn revoke_session(&self, session_id: Uuid, at: OffsetDateTime) -> StoreResult<()>;

    /// Update a session's last seen time.
    async fn touch_session(&self, session_id: Uuid, at: OffsetDateTime) -> StoreResult<()>;

    /// Get the session created by startup bootstrap, if recorded.
    async fn get_bootstrap_session_id(&self) -> StoreResult<Option<Uuid>>;

    /// Record the bootstrap session ID.
    async fn set_bootstrap_session_id(&self, session_id: Uuid) -> StoreResult<()>;
}
