//! Core domain types and shared logic for the paddock registry.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Driver and team records
//! - Filter fields and operators (the allow-list)
//! - Identity claims and verification verdicts
//! - Configuration types

pub mod config;
pub mod error;
pub mod filter;
pub mod identity;
pub mod record;

pub use error::{Error, Result};
pub use filter::{DriverField, FilterOp, TeamField};
pub use identity::{SessionId, TokenClaims, Verdict};
pub use record::{Driver, Team};
