//! Data Transfer Objects
//!
//! Request and response structures for the API.

pub mod applications;
pub mod auth;
pub mod jobs;
pub mod users;

pub use applications::*;
pub use auth::*;
pub use jobs::*;
pub use users::*;
