//! Route configuration.

use crate::auth::auth_middleware;
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/login", get(handlers::login_status).post(handlers::login))
        .route("/logout", post(handlers::logout));

    let driver_routes = Router::new()
        .route("/view_driver", get(handlers::list_drivers))
        .route("/driver_details", get(handlers::driver_details))
        .route(
            "/add_driver",
            get(handlers::add_driver_form).post(handlers::add_driver),
        )
        .route(
            "/edit_driver",
            get(handlers::edit_driver_form).post(handlers::edit_driver),
        )
        .route("/delete_driver/{driver_id}", post(handlers::delete_driver))
        .route(
            "/filter_driver",
            get(handlers::list_drivers).post(handlers::filter_drivers),
        )
        .route(
            "/compare_drivers",
            get(handlers::compare_drivers_form).post(handlers::compare_drivers),
        );

    let team_routes = Router::new()
        .route("/view_team", get(handlers::list_teams))
        .route("/team_details", get(handlers::team_details))
        .route(
            "/add_team",
            get(handlers::add_team_form).post(handlers::add_team),
        )
        .route(
            "/edit_team",
            get(handlers::edit_team_form).post(handlers::edit_team),
        )
        .route("/delete_team/{team_id}", post(handlers::delete_team))
        .route(
            "/filter_team",
            get(handlers::list_teams).post(handlers::filter_teams),
        )
        .route(
            "/compare_teams",
            get(handlers::compare_teams_form).post(handlers::compare_teams),
        );

    // Health check (intentionally unauthenticated for load balancers/probes)
    let common_routes = Router::new().route("/health", get(handlers::health_check));

    Router::new()
        .merge(auth_routes)
        .merge(driver_routes)
        .merge(team_routes)
        .merge(common_routes)
        // Auth middleware (verifies the token cookie and sets the
        // AuthenticatedUser extension; handlers decide whether to require it)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
