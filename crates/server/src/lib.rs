//! HTTP API server for the paddock registry.
//!
//! This crate provides the HTTP control plane:
//! - Login and session cookie handling
//! - Driver and team CRUD endpoints
//! - Filter and comparison endpoints
//! - Health check

pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::{SessionVerifier, TokenVerifier};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
