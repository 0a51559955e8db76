//! Record store abstraction and implementations for the paddock registry.
//!
//! This crate provides the persistence layer:
//! - Driver and team collections with add/get/update/delete/list/filter
//! - Login sessions backing the token cookie
//! - Case-insensitive name lookups for duplicate checks

pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{RecordStore, SqliteStore};

use paddock_core::config::StoreConfig;
use std::sync::Arc;

/// Create a record store from configuration.
pub async fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn RecordStore>> {
    match config {
        StoreConfig::Sqlite { path } => {
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn RecordStore>)
        }
    }
}
