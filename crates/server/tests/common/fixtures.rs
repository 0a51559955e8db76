//! Test fixtures and request helpers.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sha2::{Digest, Sha256};
use tower::ServiceExt;

/// SHA-256 of `data`, lowercase hex.
#[allow(dead_code)]
pub fn sha256_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Drive the router with an optional urlencoded form body and cookie,
/// returning the status and parsed JSON body.
#[allow(dead_code)]
pub async fn form_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    form: Option<&str>,
    cookie: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let response = raw_request(router, method, uri, form, cookie).await;
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, body_json)
}

/// Same as `form_request` but hands back the raw response for header checks.
#[allow(dead_code)]
pub async fn raw_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    form: Option<&str>,
    cookie: Option<&str>,
) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }

    let body = match form {
        Some(encoded) => {
            builder = builder.header("Content-Type", "application/x-www-form-urlencoded");
            Body::from(encoded.to_string())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    router.clone().oneshot(request).await.unwrap()
}

/// Urlencoded add/edit form for a driver.
#[allow(dead_code)]
pub fn driver_form(name: &str, age: i64, team_id: Option<&str>) -> String {
    format!(
        "name={}&age={}&total_pole_positions=5&total_race_wins=3&total_points=180\
         &total_world_titles=1&total_fastest_laps=7&team_id={}",
        urlencode(name),
        age,
        team_id.unwrap_or("")
    )
}

/// Urlencoded add/edit form for a team.
#[allow(dead_code)]
pub fn team_form(team_name: &str, year_founded: i64) -> String {
    format!(
        "team_name={}&year_founded={}&total_pole_positions=20&total_race_wins=15\
         &total_constructor_titles=2&finishing_position=3",
        urlencode(team_name),
        year_founded
    )
}

/// Minimal percent-encoding for form values used in tests.
#[allow(dead_code)]
fn urlencode(value: &str) -> String {
    value.replace(' ', "+")
}
