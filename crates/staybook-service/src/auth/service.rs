//! Account authentication flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use staybook_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use staybook_auth::password::{PasswordHasher, PasswordValidator};
use staybook_auth::social::SocialProfileClient;
use staybook_core::error::AppError;
use staybook_core::result::AppResult;
use staybook_database::repositories::UserRepository;
use staybook_entity::user::{AuthProvider, CreateUser, User};

/// Input for local registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Result of a successful authentication.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    /// The authenticated user.
    pub user: User,
    /// Freshly issued tokens.
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Issues tokens for local and social accounts.
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    jwt_encoder: Arc<JwtEncoder>,
    jwt_decoder: Arc<JwtDecoder>,
    social: Arc<dyn SocialProfileClient>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        social: Arc<dyn SocialProfileClient>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            jwt_encoder,
            jwt_decoder,
            social,
        }
    }

    /// Register a local account and sign it in.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<AuthResult> {
        let email = normalize_email(&req.email)?;
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("이름을 입력해주세요"));
        }
        self.validator.validate(&req.password)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("이미 가입된 이메일입니다"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email,
                password_hash: Some(password_hash),
                name: name.to_string(),
                phone: req.phone.filter(|p| !p.trim().is_empty()),
                provider: AuthProvider::Local,
                provider_id: None,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        self.issue(user)
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthResult> {
        let invalid = || AppError::unauthorized("이메일 또는 비밀번호가 올바르지 않습니다");

        let email = normalize_email(email).map_err(|_| invalid())?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid)?;

        let Some(hash) = user.password_hash.as_deref() else {
            warn!(user_id = %user.id, provider = %user.provider, "Password login on social account");
            return Err(invalid());
        };
        if !self.hasher.verify_password(password, hash)? {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(invalid());
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(user)
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResult> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;
        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("존재하지 않는 사용자입니다"))?;
        self.issue(user)
    }

    /// Sign in with a social provider access token.
    ///
    /// Finds the account by provider id, then links an existing account with
    /// the same email, then creates a new account.
    pub async fn social_login(
        &self,
        provider: AuthProvider,
        access_token: &str,
    ) -> AppResult<AuthResult> {
        if !provider.is_social() {
            return Err(AppError::validation("지원하지 않는 로그인 방식입니다"));
        }
        let profile = self.social.fetch_profile(provider, access_token).await?;

        if let Some(user) = self
            .user_repo
            .find_by_provider(provider, &profile.provider_id)
            .await?
        {
            return self.issue(user);
        }

        let email = profile
            .email
            .as_deref()
            .ok_or_else(|| AppError::validation("이메일 제공에 동의해야 가입할 수 있습니다"))
            .and_then(normalize_email)?;

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(existing) => {
                info!(user_id = %existing.id, provider = %provider, "Linking social account");
                self.user_repo
                    .link_provider(existing.id, provider, &profile.provider_id)
                    .await?
            }
            None => {
                let name = profile
                    .name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
                let user = self
                    .user_repo
                    .create(&CreateUser {
                        email,
                        password_hash: None,
                        name,
                        phone: None,
                        provider,
                        provider_id: Some(profile.provider_id.clone()),
                    })
                    .await?;
                info!(user_id = %user.id, provider = %provider, "Social user registered");
                user
            }
        };

        self.issue(user)
    }

    fn issue(&self, user: User) -> AppResult<AuthResult> {
        let tokens = self
            .jwt_encoder
            .generate_token_pair(user.id, &user.email, user.role)?;
        Ok(AuthResult { user, tokens })
    }
}

/// Trim and lowercase an email, rejecting obviously malformed input.
pub(crate) fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::validation("올바른 이메일 형식이 아닙니다")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Guest@Example.COM ").unwrap(),
            "guest@example.com"
        );
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("guest@localhost").is_err());
    }
}
