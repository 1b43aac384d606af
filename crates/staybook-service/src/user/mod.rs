//! User self-service: profile and password.

pub mod service;

pub use service::{UpdateProfileRequest, UserService};
