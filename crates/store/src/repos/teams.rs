//! Team repository.

use crate::error::StoreResult;
use crate::models::TeamRow;
use async_trait::async_trait;
use paddock_core::filter::{FilterOp, TeamField};
use uuid::Uuid;

/// Repository for team operations.
#[async_trait]
pub trait TeamRepo: Send + Sync {
    /// Create a new team.
    async fn create_team(&self, team: &TeamRow) -> StoreResult<()>;

    /// Get a team by ID.
    async fn get_team(&self, team_id: Uuid) -> StoreResult<Option<TeamRow>>;

    /// Get a team by name, case-insensitively.
    async fn get_team_by_name(&self, team_name: &str) -> StoreResult<Option<TeamRow>>;

    /// Full-replace a team's fields. Timestamps other than `updated_at`
    /// are preserved.
    async fn update_team(&self, team: &TeamRow) -> StoreResult<()>;

    /// Delete a team by ID. Referencing drivers are left untouched.
    async fn delete_team(&self, team_id: Uuid) -> StoreResult<()>;

    /// List all teams.
    async fn list_teams(&self) -> StoreResult<Vec<TeamRow>>;

    /// Filter teams by one allow-listed attribute.
    async fn filter_teams(
        &self,
        field: TeamField,
        op: FilterOp,
        value: i64,
    ) -> StoreResult<Vec<TeamRow>>;
}
