//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::provider::AuthProvider;
use super::role::UserRole;

/// A registered StayBook account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique email address (login name).
    pub email: String,
    /// Argon2 password hash. Social accounts have none.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Where the account was created.
    pub provider: AuthProvider,
    /// Identifier of the account at the social provider.
    #[serde(skip_serializing, default)]
    pub provider_id: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the account can sign in with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address, already normalized to lowercase.
    pub email: String,
    /// Pre-hashed password (local accounts only).
    pub password_hash: Option<String>,
    /// Display name.
    pub name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Account origin.
    pub provider: AuthProvider,
    /// Identifier at the social provider.
    pub provider_id: Option<String>,
}

/// Editable profile fields; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    /// New display name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}
