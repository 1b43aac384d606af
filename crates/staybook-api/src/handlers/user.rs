//! User self-service handlers.

use axum::extract::State;

use staybook_entity::user::User;

use crate::dto::request::{ChangePasswordRequest, UpdateProfileRequest};
use crate::dto::response::{Envelope, done, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Envelope<User>> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(success("조회되었습니다", user))
}

/// PATCH /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Envelope<User>> {
    let user = state.user_service.update_profile(&auth, req.into()).await?;
    Ok(success("회원 정보가 수정되었습니다", user))
}

/// PUT /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Envelope<()>> {
    state
        .user_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;
    Ok(done("비밀번호가 변경되었습니다"))
}
