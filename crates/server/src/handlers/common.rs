//! Shared handler helpers and response shapes.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Request, State};
use paddock_store::RecordStore;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// Maximum request body size for form endpoints (64 KiB).
pub const MAX_FORM_BODY_SIZE: usize = 64 * 1024;

/// Structured mutation result.
///
/// Replaces the original's inline-script success signal: the client renderer
/// reads the status and follows the redirect.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    /// What happened: "created", "updated", "deleted", "logged_in", "logged_out".
    pub status: &'static str,
    /// Identifier of the affected record, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Listing view the client should navigate to.
    pub redirect: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health - Health check.
///
/// Intentionally unauthenticated: returns only non-sensitive information.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.store.health_check().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Read and parse a urlencoded form body, mirroring the browser form posts
/// the routes were built for. Malformed fields (including non-numeric values
/// in numeric fields) are a 400, uniformly across routes.
pub async fn read_form<T: serde::de::DeserializeOwned>(req: Request) -> ApiResult<T> {
    let bytes = axum::body::to_bytes(req.into_body(), MAX_FORM_BODY_SIZE)
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to read body: {e}")))?;
    serde_urlencoded::from_bytes(&bytes)
        .map_err(|e| ApiError::BadRequest(format!("invalid form: {e}")))
}

/// Format a timestamp for responses.
pub fn format_timestamp(ts: OffsetDateTime, field: &str) -> ApiResult<String> {
    ts.format(&Rfc3339)
        .map_err(|e| ApiError::Internal(format!("failed to format {field}: {e}")))
}

/// Deserialize an optional UUID form field, treating the empty string (an
/// unselected dropdown) as absent.
pub fn empty_uuid_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Query parameter carrying a record id.
#[derive(Debug, Deserialize)]
pub struct IdParam {
    pub id: Uuid,
}
