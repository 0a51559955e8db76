//! Attribute filter endpoint tests.

mod common;

use axum::http::StatusCode;
use common::TestServer;
use common::fixtures::{driver_form, form_request, team_form};

async fn seed_drivers(server: &TestServer) {
    let cookie = server.login_cookie();
    for (name, age) in [
        ("Lando Norris", 25),
        ("Fernando Alonso", 44),
        ("Lewis Hamilton", 40),
        ("Oscar Piastri", 24),
    ] {
        let (status, _) = form_request(
            &server.router,
            "POST",
            "/add_driver",
            Some(&driver_form(name, age, None)),
            Some(&cookie),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn filter_drivers_age_greater_than() {
    let server = TestServer::new().await;
    seed_drivers(&server).await;

    let (status, body) = form_request(
        &server.router,
        "POST",
        "/filter_driver",
        Some("attribute=age&operator=gt&value=30"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body["drivers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Fernando Alonso"));
    assert!(names.contains(&"Lewis Hamilton"));
}

#[tokio::test]
async fn filter_drivers_age_equals() {
    let server = TestServer::new().await;
    seed_drivers(&server).await;

    let (status, body) = form_request(
        &server.router,
        "POST",
        "/filter_driver",
        Some("attribute=age&operator=eq&value=25"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let drivers = body["drivers"].as_array().unwrap();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0]["name"], "Lando Norris");
}

#[tokio::test]
async fn filter_drivers_symbolic_operator_accepted() {
    let server = TestServer::new().await;
    seed_drivers(&server).await;

    let (status, body) = form_request(
        &server.router,
        "POST",
        "/filter_driver",
        Some("attribute=age&operator=%3C&value=25"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let drivers = body["drivers"].as_array().unwrap();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0]["name"], "Oscar Piastri");
}

#[tokio::test]
async fn filter_drivers_unknown_attribute_is_rejected() {
    let server = TestServer::new().await;
    seed_drivers(&server).await;

    let (status, body) = form_request(
        &server.router,
        "POST",
        "/filter_driver",
        Some("attribute=name%3B+DROP+TABLE+drivers&operator=eq&value=1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn filter_drivers_unknown_operator_is_rejected() {
    let server = TestServer::new().await;
    seed_drivers(&server).await;

    let (status, body) = form_request(
        &server.router,
        "POST",
        "/filter_driver",
        Some("attribute=age&operator=like&value=30"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn filter_drivers_malformed_value_is_rejected() {
    let server = TestServer::new().await;
    seed_drivers(&server).await;

    let (status, _) = form_request(
        &server.router,
        "POST",
        "/filter_driver",
        Some("attribute=age&operator=gt&value=fast"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn filter_teams_year_founded_less_than() {
    let server = TestServer::new().await;
    let cookie = server.login_cookie();

    for (name, year) in [("Ferrari", 1950), ("McLaren", 1963), ("Red Bull", 2005)] {
        let (status, _) = form_request(
            &server.router,
            "POST",
            "/add_team",
            Some(&team_form(name, year)),
            Some(&cookie),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = form_request(
        &server.router,
        "POST",
        "/filter_team",
        Some("attribute=year_founded&operator=lt&value=2000"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let mut names: Vec<&str> = body["teams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["team_name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Ferrari", "McLaren"]);
}

#[tokio::test]
async fn filter_teams_driver_attribute_is_rejected() {
    let server = TestServer::new().await;

    // "age" is a driver attribute, not a team one.
    let (status, body) = form_request(
        &server.router,
        "POST",
        "/filter_team",
        Some("attribute=age&operator=gt&value=10"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}
