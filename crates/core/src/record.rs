//! Driver and team record types.
//!
//! These are the wire-facing shapes of the two collections. Identity is
//! store-assigned; the `team` reference on a driver is weak (deleting a team
//! leaves referencing drivers pointing at a dangling id).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A driver record as submitted by add/edit forms.
///
/// All numeric fields are parsed as integers at the boundary; malformed
/// values are rejected before any store call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub age: i64,
    pub total_pole_positions: i64,
    pub total_race_wins: i64,
    pub total_points: i64,
    pub total_world_titles: i64,
    pub total_fastest_laps: i64,
    /// Weak reference to a team. No cascade: may dangle.
    pub team_id: Option<Uuid>,
}

impl Driver {
    /// Validate form-level invariants that don't need the store.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::InvalidRecord(
                "driver name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A team record as submitted by add/edit forms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_name: String,
    pub year_founded: i64,
    pub total_pole_positions: i64,
    pub total_race_wins: i64,
    pub total_constructor_titles: i64,
    pub finishing_position: i64,
}

impl Team {
    /// Validate form-level invariants that don't need the store.
    pub fn validate(&self) -> crate::Result<()> {
        if self.team_name.trim().is_empty() {
            return Err(crate::Error::InvalidRecord(
                "team name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Label shown on driver details when the referenced team is missing.
pub const UNKNOWN_TEAM: &str = "Unknown Team";
