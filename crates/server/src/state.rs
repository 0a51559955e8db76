//! Application state shared across handlers.

use crate::auth::TokenVerifier;
use paddock_core::config::AppConfig;
use paddock_store::RecordStore;
use std::sync::Arc;

/// Shared application state.
///
/// Initialized once at startup and cloned per request; handlers reach the
/// store and verifier only through here.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Record store.
    pub store: Arc<dyn RecordStore>,
    /// Identity token verifier.
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            verifier,
        }
    }
}
