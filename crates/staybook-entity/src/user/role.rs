//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account roles.
///
/// `Business` accounts own hotels and may move their reservations through
/// the post-stay statuses; `Admin` may do everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular guest account.
    User,
    /// Approved hotel business owner.
    Business,
    /// Full system administrator.
    Admin,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role may manage hotel-side data.
    pub fn is_business_or_admin(&self) -> bool {
        matches!(self, Self::Business | Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Business => "business",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = staybook_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "business" => Ok(Self::Business),
            "admin" => Ok(Self::Admin),
            _ => Err(staybook_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: user, business, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("BUSINESS".parse::<UserRole>().unwrap(), UserRole::Business);
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_privileges() {
        assert!(UserRole::Admin.is_business_or_admin());
        assert!(UserRole::Business.is_business_or_admin());
        assert!(!UserRole::User.is_business_or_admin());
        assert!(!UserRole::Business.is_admin());
    }
}
