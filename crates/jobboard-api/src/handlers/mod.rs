//! API Handlers
//!
//! Request handlers for all API endpoints. Gated handlers follow the same
//! order: role check, body validation, resource lookup, ownership check.

pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod users;

pub use health::*;
