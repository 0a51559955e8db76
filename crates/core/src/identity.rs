//! Identity claims and verification verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Unique identifier for a login session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse from a string.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| crate::Error::InvalidSession(format!("invalid session ID: {e}")))
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Claims carried by a verified identity token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Session backing this identity.
    pub session_id: SessionId,
    /// Stable subject identifier from the identity provider.
    pub subject: String,
    /// Display name, if the provider supplied one.
    pub display_name: Option<String>,
    /// When the backing session expires, if bounded.
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

/// Outcome of verifying an opaque identity token.
///
/// Verification never surfaces as an error: an unverifiable token is a
/// `Rejected` verdict with a reason suitable for logging.
#[derive(Clone, Debug)]
pub enum Verdict {
    /// The token maps to a live session.
    Verified { claims: TokenClaims },
    /// The token is absent, unknown, expired, or revoked.
    Rejected { reason: String },
}

impl Verdict {
    /// Reject with a reason.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Claims if verified.
    pub fn claims(&self) -> Option<&TokenClaims> {
        match self {
            Self::Verified { claims } => Some(claims),
            Self::Rejected { .. } => None,
        }
    }

    /// Whether the verdict is trusted.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_parse_round_trip() {
        let id = SessionId::new();
        assert_eq!(SessionId::parse(&id.to_string()).unwrap(), id);
        assert!(SessionId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn rejected_verdict_has_no_claims() {
        let verdict = Verdict::rejected("unknown token");
        assert!(!verdict.is_verified());
        assert!(verdict.claims().is_none());
    }
}
