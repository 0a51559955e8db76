//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Enable request tracing.
    #[serde(default)]
    pub enable_tracing: bool,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            enable_tracing: false,
        }
    }
}

/// Record store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// SQLite database.
    Sqlite {
        /// Database file path.
        path: PathBuf,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/paddock.db"),
        }
    }
}

/// Login token configuration.
///
/// The configured token is the credential the identity provider hands the
/// operator out of band. Only its hash lives in config; if the hash changes
/// between restarts, the previous bootstrap session is revoked and a new one
/// is created.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Pre-computed hash of the login token (SHA256 hex, 64 characters).
    /// Generate with: `echo -n "your-secret-token" | sha256sum`
    pub token_hash: String,
    /// Subject recorded on the bootstrap session.
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Display name recorded on the bootstrap session.
    pub display_name: Option<String>,
    /// Session lifetime in seconds. Unset means no expiry.
    pub session_ttl_secs: Option<u64>,
}

fn default_subject() -> String {
    "operator".to_string()
}

impl AuthConfig {
    /// Create a test configuration with a dummy token hash.
    ///
    /// **For testing only.** The hash is deterministic but not a real token.
    pub fn for_testing() -> Self {
        Self {
            // SHA256 of "test-login-token"
            token_hash: "3918947ea41554aff66018e316a04bfe5a087ee503abb19102a8a1484c62dea7"
                .to_string(),
            subject: "test-operator".to_string(),
            display_name: Some("Test Operator".to_string()),
            session_ttl_secs: None,
        }
    }

    /// Get the session TTL as a Duration, if bounded.
    pub fn session_ttl(&self) -> Option<Duration> {
        self.session_ttl_secs.map(|secs| {
            // Saturate at i64::MAX to prevent overflow wrapping to negative
            Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
        })
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Login token configuration (required).
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Uses SQLite storage and a dummy login token.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            auth: AuthConfig::for_testing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_defaults_to_loopback() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert!(!config.enable_tracing);
    }

    #[test]
    fn auth_config_session_ttl_unset_means_unbounded() {
        let config = AuthConfig::for_testing();
        assert!(config.session_ttl().is_none());
    }

    #[test]
    fn auth_config_session_ttl_converts_seconds() {
        let mut config = AuthConfig::for_testing();
        config.session_ttl_secs = Some(3600);
        assert_eq!(config.session_ttl(), Some(Duration::seconds(3600)));
    }

    #[test]
    fn store_config_deserializes_sqlite_variant() {
        let json = r#"{"type":"sqlite","path":"./x.db"}"#;
        let config: StoreConfig = serde_json::from_str(json).unwrap();
        let StoreConfig::Sqlite { path } = config;
        assert_eq!(path, PathBuf::from("./x.db"));
    }
}
