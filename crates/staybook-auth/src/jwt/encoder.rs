//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use staybook_core::config::AuthConfig;
use staybook_core::error::AppError;
use staybook_entity::user::UserRole;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
///
/// Access and refresh tokens are signed with different secrets so a leaked
/// refresh secret cannot mint access tokens and vice versa.
#[derive(Clone)]
pub struct JwtEncoder {
    /// Access token signing key.
    access_key: EncodingKey,
    /// Refresh token signing key.
    refresh_key: EncodingKey,
    /// Access token TTL in days.
    access_ttl_days: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_days", &self.access_ttl_days)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            access_ttl_days: config.access_ttl_days,
            refresh_ttl_days: config.refresh_ttl_days,
        }
    }

    /// Generates a new access + refresh token pair for the given user.
    pub fn generate_token_pair(
        &self,
        user_id: Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_exp = now + Duration::days(self.access_ttl_days);
        let refresh_exp = now + Duration::days(self.refresh_ttl_days);

        let access_token = self.sign(
            &self.access_key,
            Claims {
                id: user_id,
                email: email.to_string(),
                role,
                iat: now.timestamp(),
                exp: access_exp.timestamp(),
                token_type: TokenType::Access,
            },
        )?;

        let refresh_token = self.sign(
            &self.refresh_key,
            Claims {
                id: user_id,
                email: email.to_string(),
                role,
                iat: now.timestamp(),
                exp: refresh_exp.timestamp(),
                token_type: TokenType::Refresh,
            },
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at: access_exp,
            refresh_expires_at: refresh_exp,
        })
    }

    fn sign(&self, key: &EncodingKey, claims: Claims) -> Result<String, AppError> {
        encode(&Header::default(), &claims, key)
            .map_err(|e| AppError::internal(format!("Failed to encode {:?} token: {e}", claims.token_type)))
    }
}
