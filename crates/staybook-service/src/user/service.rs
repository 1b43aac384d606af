//! User self-service operations: profile viewing and password changes.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use staybook_auth::password::{PasswordHasher, PasswordValidator};
use staybook_core::error::AppError;
use staybook_core::result::AppResult;
use staybook_database::repositories::UserRepository;
use staybook_entity::user::{UpdateProfile, User};

use crate::context::RequestContext;

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
}

/// Data for updating a user's own profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name (optional).
    pub name: Option<String>,
    /// New phone number (optional).
    pub phone: Option<String>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
        }
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("사용자를 찾을 수 없습니다"))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> AppResult<User> {
        let name = match req.name {
            Some(name) if name.trim().is_empty() => {
                return Err(AppError::validation("이름은 비워둘 수 없습니다"));
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let user = self
            .user_repo
            .update_profile(
                ctx.user_id,
                &UpdateProfile {
                    name,
                    phone: req.phone.map(|p| p.trim().to_string()),
                },
            )
            .await?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Changes the current user's password.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.get_profile(ctx).await?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AppError::validation(
                "소셜 로그인 계정은 비밀번호를 변경할 수 없습니다",
            ));
        };

        if !self.hasher.verify_password(current_password, hash)? {
            return Err(AppError::unauthorized("현재 비밀번호가 올바르지 않습니다"));
        }

        self.validator.validate(new_password)?;
        self.validator
            .validate_not_same(current_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.user_repo
            .update_password(ctx.user_id, &new_hash)
            .await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }
}
