//! Record store trait and implementations.

use crate::error::{StoreError, StoreResult};
use crate::repos::{DriverRepo, SessionRepo, TeamRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined record store trait.
#[async_trait]
pub trait RecordStore: DriverRepo + TeamRepo + SessionRepo + Send + Sync {
    /// Run database migrations.
    async fn migrate(&self) -> StoreResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> StoreResult<()>;
}

/// SQLite-based record store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Create a new SQLite store.
    pub async fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; using a single connection avoids
            // persistent "database is locked" failures under test/axum concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        tracing::debug!(path = %path.display(), "SQLite record store ready");

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Implement the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::{DriverRow, SessionRow, TeamRow};
    use paddock_core::filter::{DriverField, FilterOp, TeamField};
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[async_trait]
    impl DriverRepo for SqliteStore {
        async fn create_driver(&self, driver: &DriverRow) -> StoreResult<()> {
            if let Some(existing) = self.get_driver_by_name(&driver.name).await? {
                return Err(StoreError::AlreadyExists(format!(
                    "driver name '{}' already exists (id={})",
                    driver.name, existing.driver_id
                )));
            }

            sqlx::query(
                r#"
                INSERT INTO drivers (
                    driver_id, name, age, total_pole_positions, total_race_wins,
                    total_points, total_world_titles, total_fastest_laps, team_id,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(driver.driver_id)
            .bind(&driver.name)
            .bind(driver.age)
            .bind(driver.total_pole_positions)
            .bind(driver.total_race_wins)
            .bind(driver.total_points)
            .bind(driver.total_world_titles)
            .bind(driver.total_fastest_laps)
            .bind(driver.team_id)
            .bind(driver.created_at)
            .bind(driver.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_driver(&self, driver_id: Uuid) -> StoreResult<Option<DriverRow>> {
            let row = sqlx::query_as::<_, DriverRow>("SELECT * FROM drivers WHERE driver_id = ?")
                .bind(driver_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn get_driver_by_name(&self, name: &str) -> StoreResult<Option<DriverRow>> {
            let row = sqlx::query_as::<_, DriverRow>(
                "SELECT * FROM drivers WHERE name = ? COLLATE NOCASE",
            )
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn update_driver(&self, driver: &DriverRow) -> StoreResult<()> {
            // The duplicate-name invariant applies on edit too, excluding the
            // record being edited.
            if let Some(existing) = self.get_driver_by_name(&driver.name).await?
                && existing.driver_id != driver.driver_id
            {
                return Err(StoreError::AlreadyExists(format!(
                    "driver name '{}' already exists (id={})",
                    driver.name, existing.driver_id
                )));
            }

            let result = sqlx::query(
                r#"
                UPDATE drivers SET
                    name = ?, age = ?, total_pole_positions = ?, total_race_wins = ?,
                    total_points = ?, total_world_titles = ?, total_fastest_laps = ?,
                    team_id = ?, updated_at = ?
                WHERE driver_id = ?
                "#,
            )
            .bind(&driver.name)
            .bind(driver.age)
            .bind(driver.total_pole_positions)
            .bind(driver.total_race_wins)
            .bind(driver.total_points)
            .bind(driver.total_world_titles)
            .bind(driver.total_fastest_laps)
            .bind(driver.team_id)
            .bind(driver.updated_at)
            .bind(driver.driver_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!(
                    "driver_id {} not found",
                    driver.driver_id
                )));
            }
            Ok(())
        }

        async fn delete_driver(&self, driver_id: Uuid) -> StoreResult<()> {
            let result = sqlx::query("DELETE FROM drivers WHERE driver_id = ?")
                .bind(driver_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!(
                    "driver_id {} not found",
                    driver_id
                )));
            }
            Ok(())
        }

        async fn list_drivers(&self) -> StoreResult<Vec<DriverRow>> {
            let rows = sqlx::query_as::<_, DriverRow>("SELECT * FROM drivers ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
            Ok(rows)
        }

        async fn filter_drivers(
            &self,
            field: DriverField,
            op: FilterOp,
            value: i64,
        ) -> StoreResult<Vec<DriverRow>> {
            // Column and operator come from fixed enums, never client input.
            let sql = format!(
                "SELECT * FROM drivers WHERE {} {} ?",
                field.column(),
                op.as_sql()
            );
            let rows = sqlx::query_as::<_, DriverRow>(&sql)
                .bind(value)
                .fetch_all(&self.pool)
                .await?;
            Ok(rows)
        }
    }

    #[async_trait]
    impl TeamRepo for SqliteStore {
        async fn create_team(&self, team: &TeamRow) -> StoreResult<()> {
            if let Some(existing) = self.get_team_by_name(&team.team_name).await? {
                return Err(StoreError::AlreadyExists(format!(
                    "team name '{}' already exists (id={})",
                    team.team_name, existing.team_id
                )));
            }

            sqlx::query(
                r#"
                INSERT INTO teams (
                    team_id, team_name, year_founded, total_pole_positions,
                    total_race_wins, total_constructor_titles, finishing_position,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(team.team_id)
            .bind(&team.team_name)
            .bind(team.year_founded)
            .bind(team.total_pole_positions)
            .bind(team.total_race_wins)
            .bind(team.total_constructor_titles)
            .bind(team.finishing_position)
            .bind(team.created_at)
            .bind(team.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_team(&self, team_id: Uuid) -> StoreResult<Option<TeamRow>> {
            let row = sqlx::query_as::<_, TeamRow>("SELECT * FROM teams WHERE team_id = ?")
                .bind(team_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn get_team_by_name(&self, team_name: &str) -> StoreResult<Option<TeamRow>> {
            let row = sqlx::query_as::<_, TeamRow>(
                "SELECT * FROM teams WHERE team_name = ? COLLATE NOCASE",
            )
            .bind(team_name)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn update_team(&self, team: &TeamRow) -> StoreResult<()> {
            if let Some(existing) = self.get_team_by_name(&team.team_name).await?
                && existing.team_id != team.team_id
            {
                return Err(StoreError::AlreadyExists(format!(
                    "team name '{}' already exists (id={})",
                    team.team_name, existing.team_id
                )));
            }

            let result = sqlx::query(
                r#"
                UPDATE teams SET
                    team_name = ?, year_founded = ?, total_pole_positions = ?,
                    total_race_wins = ?, total_constructor_titles = ?,
                    finishing_position = ?, updated_at = ?
                WHERE team_id = ?
                "#,
            )
            .bind(&team.team_name)
            .bind(team.year_founded)
            .bind(team.total_pole_positions)
            .bind(team.total_race_wins)
            .bind(team.total_constructor_titles)
            .bind(team.finishing_position)
            .bind(team.updated_at)
            .bind(team.team_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!(
                    "team_id {} not found",
                    team.team_id
                )));
            }
            Ok(())
        }

        async fn delete_team(&self, team_id: Uuid) -> StoreResult<()> {
            // Weak reference semantics: referencing drivers keep their
            // (now dangling) team_id.
            let result = sqlx::query("DELETE FROM teams WHERE team_id = ?")
                .bind(team_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!(
                    "team_id {} not found",
                    team_id
                )));
            }
            Ok(())
        }

        async fn list_teams(&self) -> StoreResult<Vec<TeamRow>> {
            let rows = sqlx::query_as::<_, TeamRow>("SELECT * FROM teams ORDER BY team_name")
                .fetch_all(&self.pool)
                .await?;
            Ok(rows)
        }

        async fn filter_teams(
            &self,
            field: TeamField,
            op: FilterOp,
            value: i64,
        ) -> StoreResult<Vec<TeamRow>> {
            let sql = format!(
                "SELECT * FROM teams WHERE {} {} ?",
                field.column(),
                op.as_sql()
            );
            let rows = sqlx::query_as::<_, TeamRow>(&sql)
                .bind(value)
                .fetch_all(&self.pool)
                .await?;
            Ok(rows)
        }
    }

    #[async_trait]
    impl SessionRepo for SqliteStore {
        async fn create_session(&self, session: &SessionRow) -> StoreResult<()> {
            sqlx::query(
                r#"
                INSERT INTO sessions (
                    session_id, token_hash, subject, display_name,
                    expires_at, revoked_at, created_at, last_seen_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(session.session_id)
            .bind(&session.token_hash)
            .bind(&session.subject)
            .bind(&session.display_name)
            .bind(session.expires_at)
            .bind(session.revoked_at)
            .bind(session.created_at)
            .bind(session.last_seen_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_session_by_hash(&self, token_hash: &str) -> StoreResult<Option<SessionRow>> {
            let row = sqlx::query_as::<_, SessionRow>(
                "SELECT * FROM sessions WHERE token_hash = ?",
            )
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn revoke_session(&self, session_id: Uuid, at: OffsetDateTime) -> StoreResult<()> {
            let result =
                sqlx::query("UPDATE sessions SET revoked_at = ? WHERE session_id = ?")
                    .bind(at)
                    .bind(session_id)
                    .execute(&self.pool)
                    .await?;
            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!(
                    "session_id {} not found",
                    session_id
                )));
            }
            Ok(())
        }

        async fn touch_session(&self, session_id: Uuid, at: OffsetDateTime) -> StoreResult<()> {
            sqlx::query("UPDATE sessions SET last_seen_at = ? WHERE session_id = ?")
                .bind(at)
                .bind(session_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        }

        async fn get_bootstrap_session_id(&self) -> StoreResult<Option<Uuid>> {
            let value: Option<String> =
                sqlx::query_scalar("SELECT value FROM meta WHERE key = 'bootstrap_session_id'")
                    .fetch_optional(&self.pool)
                    .await?;
            match value {
                Some(s) => {
                    let id = Uuid::parse_str(&s).map_err(|e| {
                        StoreError::Internal(format!("corrupt bootstrap_session_id: {e}"))
                    })?;
                    Ok(Some(id))
                }
                None => Ok(None),
            }
        }

        async fn set_bootstrap_session_id(&self, session_id: Uuid) -> StoreResult<()> {
            sqlx::query(
                "INSERT INTO meta (key, value) VALUES ('bootstrap_session_id', ?) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(session_id.to_string())
            .execute(&self.pool)
            .await?;
            Ok(())
        }
    }
}

/// Database schema.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS drivers (
    driver_id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    total_pole_positions INTEGER NOT NULL,
    total_race_wins INTEGER NOT NULL,
    total_points INTEGER NOT NULL,
    total_world_titles INTEGER NOT NULL,
    total_fastest_laps INTEGER NOT NULL,
    team_id BLOB,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_drivers_name_nocase
    ON drivers (name COLLATE NOCASE);

CREATE TABLE IF NOT EXISTS teams (
    team_id BLOB PRIMARY KEY,
    team_name TEXT NOT NULL,
    year_founded INTEGER NOT NULL,
    total_pole_positions INTEGER NOT NULL,
    total_race_wins INTEGER NOT NULL,
    total_constructor_titles INTEGER NOT NULL,
    finishing_position INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_teams_name_nocase
    ON teams (team_name COLLATE NOCASE);

CREATE TABLE IF NOT EXISTS sessions (
    session_id BLOB PRIMARY KEY,
    token_hash TEXT NOT NULL UNIQUE,
    subject TEXT NOT NULL,
    display_name TEXT,
    expires_at TEXT,
    revoked_at TEXT,
    created_at TEXT NOT NULL,
    last_seen_at TEXT
);

CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
