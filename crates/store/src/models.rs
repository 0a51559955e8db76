//! Database models mapping to the record store schema.

use paddock_core::record::{Driver, Team};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Driver record.
#[derive(Debug, Clone, FromRow)]
pub struct DriverRow {
    pub driver_id: Uuid,
    pub name: String,
    pub age: i64,
    pub total_pole_positions: i64,
    pub total_race_wins: i64,
    pub total_points: i64,
    pub total_world_titles: i64,
    pub total_fastest_laps: i64,
    /// Weak reference to teams.team_id. Not foreign-key enforced: deleting a
    /// team leaves referencing drivers dangling.
    pub team_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl DriverRow {
    /// Build a fresh row from form-level fields.
    pub fn from_record(record: &Driver, now: OffsetDateTime) -> Self {
        Self {
            driver_id: Uuid::new_v4(),
            name: record.name.clone(),
            age: record.age,
            total_pole_positions: record.total_pole_positions,
            total_race_wins: record.total_race_wins,
            total_points: record.total_points,
            total_world_titles: record.total_world_titles,
            total_fastest_laps: record.total_fastest_laps,
            team_id: record.team_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Team record.
#[derive(Debug, Clone, FromRow)]
pub struct TeamRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub year_founded: i64,
    pub total_pole_positions: i64,
    pub total_race_wins: i64,
    pub total_constructor_titles: i64,
    pub finishing_position: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TeamRow {
    /// Build a fresh row from form-level fields.
    pub fn from_record(record: &Team, now: OffsetDateTime) -> Self {
        Self {
            team_id: Uuid::new_v4(),
            team_name: record.team_name.clone(),
            year_founded: record.year_founded,
            total_pole_positions: record.total_pole_positions,
            total_race_wins: record.total_race_wins,
            total_constructor_titles: record.total_constructor_titles,
            finishing_position: record.finishing_position,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Login session record.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub session_id: Uuid,
    /// SHA-256 of the opaque identity token, lowercase hex.
    pub token_hash: String,
    pub subject: String,
    pub display_name: Option<String>,
    pub expires_at: Option<OffsetDateTime>,
    pub revoked_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub last_seen_at: Option<OffsetDateTime>,
}

impl SessionRow {
    /// Check if the session is live (not expired or revoked) at `now`.
    pub fn is_live(&self, now: OffsetDateTime) -> bool {
        if self.revoked_at.is_some() {
            return false;
        }
        if let Some(expires_at) = self.expires_at
            && now > expires_at
        {
            return false;
        }
        true
    }
}
