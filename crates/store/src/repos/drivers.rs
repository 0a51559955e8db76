//! Driver repository.

use crate::error::StoreResult;
use crate::models::DriverRow;
use async_trait::async_trait;
use paddock_core::filter::{DriverField, FilterOp};
use uuid::Uuid;

/// Repository for driver operations.
#[async_trait]
pub trait DriverRepo: Send + Sync {
    /// Create a new driver.
    async fn create_driver(&self, driver: &DriverRow) -> StoreResult<()>;

    /// Get a driver by ID.
    async fn get_driver(&self, driver_id: Uuid) -> StoreResult<Option<DriverRow>>;

    /// Get a driver by name, case-insensitively.
    async fn get_driver_by_name(&self, name: &str) -> StoreResult<Option<DriverRow>>;

    /// Full-replace a driver's fields. Timestamps other than `updated_at`
    /// are preserved.
    async fn update_driver(&self, driver: &DriverRow) -> StoreResult<()>;

    /// Delete a driver by ID.
    async fn delete_driver(&self, driver_id: Uuid) -> StoreResult<()>;

    /// List all drivers.
    async fn list_drivers(&self) -> StoreResult<Vec<DriverRow>>;

    /// Filter drivers by one allow-listed attribute.
    async fn filter_drivers(
        &self,
        field: DriverField,
        op: FilterOp,
        value: i64,
    ) -> StoreResult<Vec<DriverRow>>;
}
