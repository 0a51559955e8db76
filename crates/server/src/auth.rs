//! Authentication middleware and token verification.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use paddock_core::identity::{SessionId, TokenClaims, Verdict};
use paddock_store::RecordStore;
use paddock_store::repos::SessionRepo;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use time::OffsetDateTime;

/// Name of the identity-token cookie set on successful login.
pub const TOKEN_COOKIE: &str = "token";

/// Verifies an opaque identity token.
///
/// This is the seam to the external identity provider: implementations
/// return a verdict, never an error. Anything that goes wrong during
/// verification is a `Rejected` verdict with the reason inside.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Verdict;
}

/// Verifier backed by the session table.
///
/// The presented token is hashed and looked up; expired or revoked sessions
/// are rejected. `last_seen_at` is updated fire-and-forget.
pub struct SessionVerifier {
    store: Arc<dyn RecordStore>,
}

impl SessionVerifier {
    /// Create a new session verifier.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TokenVerifier for SessionVerifier {
    async fn verify(&self, token: &str) -> Verdict {
        let token_hash = hash_token(token);

        let session = match self.store.get_session_by_hash(&token_hash).await {
            Ok(Some(session)) => session,
            Ok(None) => return Verdict::rejected("unknown token"),
            Err(e) => return Verdict::rejected(format!("session lookup failed: {e}")),
        };

        let now = OffsetDateTime::now_utc();
        if session.revoked_at.is_some() {
            return Verdict::rejected("session revoked");
        }
        if !session.is_live(now) {
            return Verdict::rejected("session expired");
        }

        // Update last seen time (fire and forget)
        let store = self.store.clone();
        let session_id = session.session_id;
        tokio::spawn(async move {
            let _ = store.touch_session(session_id, now).await;
        });

        Verdict::Verified {
            claims: TokenClaims {
                session_id: SessionId::from_uuid(session.session_id),
                subject: session.subject,
                display_name: session.display_name,
                expires_at: session.expires_at,
            },
        }
    }
}

/// Authenticated request extension.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    /// Claims from the verified token.
    pub claims: TokenClaims,
}

/// Hash a token for session lookup.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Authentication middleware that resolves the token cookie into an
/// `AuthenticatedUser` extension.
///
/// Absent or unverifiable tokens are not an error here: handlers decide
/// whether the route requires identity.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        match state.verifier.verify(cookie.value()).await {
            Verdict::Verified { claims } => {
                req.extensions_mut().insert(AuthenticatedUser { claims });
            }
            Verdict::Rejected { reason } => {
                tracing::debug!(reason = %reason, "Token cookie rejected");
            }
        }
    }

    Ok(next.run(req).await)
}

/// Require authentication (a verified token cookie must be present).
pub fn require_auth(req: &Request) -> ApiResult<&AuthenticatedUser> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))
}

/// Get optional authentication.
pub fn get_auth(req: &Request) -> Option<&AuthenticatedUser> {
    req.extensions().get::<AuthenticatedUser>()
}

// Note: hex is a simple utility, we'll inline it
mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_store::SqliteStore;
    use paddock_store::models::SessionRow;
    use time::Duration;
    use uuid::Uuid;

    async fn open_store() -> (tempfile::TempDir, Arc<dyn RecordStore>) {
        let temp = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(temp.path().join("paddock.db"))
            .await
            .unwrap();
        (temp, Arc::new(store))
    }

    async fn insert_session(
        store: &Arc<dyn RecordStore>,
        token: &str,
        expires_at: Option<OffsetDateTime>,
        revoked_at: Option<OffsetDateTime>,
    ) {
        let session = SessionRow {
            session_id: Uuid::new_v4(),
            token_hash: hash_token(token),
            subject: "test-operator".to_string(),
            display_name: Some("Test Operator".to_string()),
            expires_at,
            revoked_at,
            created_at: OffsetDateTime::now_utc(),
            last_seen_at: None,
        };
        store.create_session(&session).await.unwrap();
    }

    #[test]
    fn hash_token_is_lowercase_hex() {
        let hash = hash_token("test-login-token");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, hash.to_lowercase());
    }

    #[tokio::test]
    async fn verify_accepts_live_session() {
        let (_temp, store) = open_store().await;
        insert_session(&store, "good-token", None, None).await;

        let verifier = SessionVerifier::new(store);
        let verdict = verifier.verify("good-token").await;
        let claims = verdict.claims().expect("expected verified");
        assert_eq!(claims.subject, "test-operator");
    }

    #[tokio::test]
    async fn verify_rejects_unknown_token() {
        let (_temp, store) = open_store().await;
        let verifier = SessionVerifier::new(store);
        assert!(!verifier.verify("never-issued").await.is_verified());
    }

    #[tokio::test]
    async fn verify_rejects_expired_session() {
        let (_temp, store) = open_store().await;
        let past = OffsetDateTime::now_utc() - Duration::seconds(10);
        insert_session(&store, "expired-token", Some(past), None).await;

        let verifier = SessionVerifier::new(store);
        assert!(!verifier.verify("expired-token").await.is_verified());
    }

    #[tokio::test]
    async fn verify_rejects_revoked_session() {
        let (_temp, store) = open_store().await;
        let now = OffsetDateTime::now_utc();
        insert_session(&store, "revoked-token", None, Some(now)).await;

        let verifier = SessionVerifier::new(store);
        assert!(!verifier.verify("revoked-token").await.is_verified());
    }
}
