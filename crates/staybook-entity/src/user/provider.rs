//! Account origin enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where an account was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "auth_provider", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Email and password.
    Local,
    /// Kakao login.
    Kakao,
    /// Google login.
    Google,
    /// Naver login.
    Naver,
}

impl AuthProvider {
    /// Return the provider as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Kakao => "kakao",
            Self::Google => "google",
            Self::Naver => "naver",
        }
    }

    /// Whether this is a third-party provider.
    pub fn is_social(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = staybook_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "kakao" => Ok(Self::Kakao),
            "google" => Ok(Self::Google),
            "naver" => Ok(Self::Naver),
            _ => Err(staybook_core::AppError::validation(format!(
                "Unsupported login provider: '{s}'"
            ))),
        }
    }
}
