//! HTTP request handlers.

pub mod auth;
pub mod common;
pub mod drivers;
pub mod teams;

pub use auth::*;
pub use common::*;
pub use drivers::*;
pub use teams::*;
