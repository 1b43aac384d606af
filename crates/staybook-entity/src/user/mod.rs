//! User domain entities.

pub mod model;
pub mod provider;
pub mod role;

pub use model::{CreateUser, UpdateProfile, User};
pub use provider::AuthProvider;
pub use role::UserRole;
