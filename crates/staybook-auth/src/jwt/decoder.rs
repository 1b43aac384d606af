//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use staybook_core::config::AuthConfig;
use staybook_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates access and refresh tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// Access token verification key.
    access_key: DecodingKey,
    /// Refresh token verification key.
    refresh_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            access_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token, &self.access_key)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::unauthorized("액세스 토큰이 아닙니다"));
        }
        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token, &self.refresh_key)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::unauthorized("리프레시 토큰이 아닙니다"));
        }
        Ok(claims)
    }

    fn decode_token(&self, token: &str, key: &DecodingKey) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("토큰이 만료되었습니다")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("토큰 서명이 올바르지 않습니다")
                }
                _ => AppError::unauthorized("유효하지 않은 토큰입니다"),
            }
        })?;

        Ok(token_data.claims)
    }
}
