//! Server test utilities.

use paddock_core::config::AppConfig;
use paddock_server::bootstrap::ensure_login_session;
use paddock_server::{AppState, SessionVerifier, create_router};
use paddock_store::{RecordStore, SqliteStore};
use std::sync::Arc;
use tempfile::TempDir;

/// Token whose hash is carried by `AuthConfig::for_testing()`.
pub const TEST_TOKEN: &str = "test-login-token";

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with a temporary database and the test login
    /// session already bootstrapped.
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

        let db_path = temp_dir.path().join("paddock.db");
        let store: Arc<dyn RecordStore> = Arc::new(
            SqliteStore::new(&db_path)
                .await
                .expect("Failed to create record store"),
        );

        let config = AppConfig::for_testing();
        ensure_login_session(store.as_ref(), &config.auth)
            .await
            .expect("Failed to bootstrap login session");

        let verifier = Arc::new(SessionVerifier::new(store.clone()));
        let state = AppState::new(config, store, verifier);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying store.
    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.state.store.clone()
    }

    /// Cookie header value for the bootstrapped test session.
    pub fn login_cookie(&self) -> String {
        format!("token={TEST_TOKEN}")
    }
}
