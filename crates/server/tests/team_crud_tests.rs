//! Team CRUD endpoint tests.

mod common;

use axum::http::StatusCode;
use common::TestServer;
use common::fixtures::{form_request, team_form};

#[tokio::test]
async fn add_team_creates_record() {
    let server = TestServer::new().await;
    let cookie = server.login_cookie();

    let (status, body) = form_request(
        &server.router,
        "POST",
        "/add_team",
        Some(&team_form("Ferrari", 1950)),
        Some(&cookie),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "created");
    assert_eq!(body["redirect"], "/view_team");
    let team_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = form_request(&server.router, "GET", "/view_team", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let teams = body["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["team_id"], team_id.as_str());
    assert_eq!(teams[0]["team_name"], "Ferrari");
    assert_eq!(teams[0]["year_founded"], 1950);
}

#[tokio::test]
async fn add_team_duplicate_name_is_rejected() {
    let server = TestServer::new().await;
    let cookie = server.login_cookie();

    let (status, _) = form_request(
        &server.router,
        "POST",
        "/add_team",
        Some(&team_form("Williams", 1977)),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = form_request(
        &server.router,
        "POST",
        "/add_team",
        Some(&team_form("WILLIAMS", 1977)),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[tokio::test]
async fn team_details_returns_record() {
    let server = TestServer::new().await;
    let cookie = server.login_cookie();

    let (_, body) = form_request(
        &server.router,
        "POST",
        "/add_team",
        Some(&team_form("Alpine", 2021)),
        Some(&cookie),
    )
    .await;
    let team_id = body["id"].as_str().unwrap().to_string();

    let uri = format!("/team_details?id={team_id}");
    let (status, body) = form_request(&server.router, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team_name"], "Alpine");
    assert_eq!(body["year_founded"], 2021);
}

#[tokio::test]
async fn team_details_unknown_id_is_404() {
    let server = TestServer::new().await;

    let uri = format!("/team_details?id={}", uuid::Uuid::new_v4());
    let (status, body) = form_request(&server.router, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn edit_team_replaces_fields() {
    let server = TestServer::new().await;
    let cookie = server.login_cookie();

    let (_, body) = form_request(
        &server.router,
        "POST",
        "/add_team",
        Some(&team_form("Sauber", 1993)),
        Some(&cookie),
    )
    .await;
    let team_id = body["id"].as_str().unwrap().to_string();

    let uri = format!("/edit_team?id={team_id}");
    let (status, body) = form_request(
        &server.router,
        "POST",
        &uri,
        Some(&team_form("Audi", 1993)),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "updated");

    let uri = format!("/team_details?id={team_id}");
    let (_, body) = form_request(&server.router, "GET", &uri, None, None).await;
    assert_eq!(body["team_name"], "Audi");
}

#[tokio::test]
async fn edit_team_rename_onto_existing_name_conflicts() {
    let server = TestServer::new().await;
    let cookie = server.login_cookie();

    let (status, _) = form_request(
        &server.router,
        "POST",
        "/add_team",
        Some(&team_form("Mercedes", 1954)),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = form_request(
        &server.router,
        "POST",
        "/add_team",
        Some(&team_form("Aston Martin", 2021)),
        Some(&cookie),
    )
    .await;
    let aston_id = body["id"].as_str().unwrap().to_string();

    let uri = format!("/edit_team?id={aston_id}");
    let (status, body) = form_request(
        &server.router,
        "POST",
        &uri,
        Some(&team_form("mercedes", 2021)),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[tokio::test]
async fn delete_team_removes_record() {
    let server = TestServer::new().await;
    let cookie = server.login_cookie();

    let (_, body) = form_request(
        &server.router,
        "POST",
        "/add_team",
        Some(&team_form("Haas", 2016)),
        Some(&cookie),
    )
    .await;
    let team_id = body["id"].as_str().unwrap().to_string();

    let uri = format!("/delete_team/{team_id}");
    let (status, body) = form_request(&server.router, "POST", &uri, None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    let (_, body) = form_request(&server.router, "GET", "/view_team", None, None).await;
    assert!(body["teams"].as_array().unwrap().is_empty());
}
