//! Registration, login, token refresh, and social login.

pub mod service;

pub use service::{AuthResult, AuthService, RegisterRequest};
