//! Login and session endpoints.

use crate::auth::{TOKEN_COOKIE, require_auth};
use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{MutationResponse, format_timestamp, read_form};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Request, State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use paddock_core::identity::Verdict;
use serde::{Deserialize, Serialize};

/// Login form: the opaque token handed out by the identity provider.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub token: String,
}

/// Identity of the current session.
#[derive(Debug, Serialize)]
pub struct LoginStatusResponse {
    pub subject: String,
    pub display_name: Option<String>,
    pub session_id: String,
    pub expires_at: Option<String>,
}

/// GET /login - Identity of the current session.
pub async fn login_status(req: Request) -> ApiResult<Json<LoginStatusResponse>> {
    let auth = require_auth(&req)?;
    let claims = &auth.claims;

    let expires_at = match claims.expires_at {
        Some(ts) => Some(format_timestamp(ts, "expires_at")?),
        None => None,
    };

    Ok(Json(LoginStatusResponse {
        subject: claims.subject.clone(),
        display_name: claims.display_name.clone(),
        session_id: claims.session_id.to_string(),
        expires_at,
    }))
}

/// POST /login - Verify the submitted token and set the session cookie.
///
/// The cookie carries the opaque token itself; every later request re-verifies
/// it through the middleware, so there is no separate server-side login state
/// to invalidate.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
) -> ApiResult<(CookieJar, Json<MutationResponse>)> {
    let form: LoginForm = read_form(req).await?;

    match state.verifier.verify(&form.token).await {
        Verdict::Verified { claims } => {
            tracing::info!(subject = %claims.subject, "Login succeeded");

            let cookie = Cookie::build((TOKEN_COOKIE, form.token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();

            Ok((
                jar.add(cookie),
                Json(MutationResponse {
                    status: "logged_in",
                    id: Some(claims.session_id.to_string()),
                    redirect: "/view_driver",
                }),
            ))
        }
        Verdict::Rejected { reason } => {
            tracing::warn!(reason = %reason, "Login rejected");
            Err(ApiError::Unauthorized("invalid token".to_string()))
        }
    }
}

/// POST /logout - Clear the session cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MutationResponse>) {
    let cookie = Cookie::build((TOKEN_COOKIE, "")).path("/").build();
    (
        jar.remove(cookie),
        Json(MutationResponse {
            status: "logged_out",
            id: None,
            redirect: "/login",
        }),
    )
}
