//! Login session initialization.

use anyhow::{Result, bail};
use paddock_core::config::AuthConfig;
use paddock_store::RecordStore;
use paddock_store::models::SessionRow;
use paddock_store::repos::SessionRepo;
use time::OffsetDateTime;
use uuid::Uuid;

/// Ensure the configured login token has a live session, rotating the
/// previous one if needed.
///
/// If the token hash changes between restarts, the previous bootstrap
/// session is automatically revoked and a new one is created with the new
/// hash.
pub async fn ensure_login_session(store: &dyn RecordStore, config: &AuthConfig) -> Result<()> {
    // Normalize to lowercase to match auth::hash_token() which uses lowercase
    // hex encoding. Without this, uppercase hashes in config would never
    // match during verification.
    let hash = config
        .token_hash
        .strip_prefix("sha256:")
        .unwrap_or(&config.token_hash)
        .to_lowercase();
    let hash = hash.as_str();
    if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("invalid login token_hash: expected 64 hex chars");
    }

    let now = OffsetDateTime::now_utc();
    if let Some(existing) = store.get_session_by_hash(hash).await? {
        if existing.revoked_at.is_some() {
            bail!(
                "login token hash matches a revoked session (id={}); \
                 use a new token hash or clear the revoked session",
                existing.session_id
            );
        }
        if let Some(expires_at) = existing.expires_at
            && expires_at <= now
        {
            bail!(
                "login token hash matches an expired session (id={}, expired={}); \
                 use a new token hash",
                existing.session_id,
                expires_at
            );
        }
        store.set_bootstrap_session_id(existing.session_id).await?;
        tracing::debug!("Login session already exists");
        return Ok(());
    }

    if let Some(prev_id) = store.get_bootstrap_session_id().await? {
        store.revoke_session(prev_id, now).await?;
        tracing::info!(session_id = %prev_id, "Previous login session revoked");
    }

    let session = SessionRow {
        session_id: Uuid::new_v4(),
        token_hash: hash.to_string(),
        subject: config.subject.clone(),
        display_name: config.display_name.clone(),
        expires_at: config.session_ttl().map(|ttl| now + ttl),
        revoked_at: None,
        created_at: now,
        last_seen_at: None,
    };

    store.create_session(&session).await?;
    store.set_bootstrap_session_id(session.session_id).await?;
    tracing::info!(session_id = %session.session_id, "Login session created");

    Ok(())
}
