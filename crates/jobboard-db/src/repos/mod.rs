//! Repository implementations

mod application;
mod job;
mod user;

pub use application::ApplicationRepo;
pub use job::JobRepo;
pub use user::UserRepo;
