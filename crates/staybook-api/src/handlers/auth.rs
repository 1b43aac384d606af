//! Authentication handlers.

use axum::extract::State;
use axum::http::StatusCode;

use staybook_service::auth::AuthResult;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest, SocialLoginRequest};
use crate::dto::response::{Envelope, success};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Envelope<AuthResult>)> {
    let result = state.auth_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, success("회원가입이 완료되었습니다", result)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Envelope<AuthResult>> {
    let result = state.auth_service.login(&req.email, &req.password).await?;
    Ok(success("로그인되었습니다", result))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> ApiResult<Envelope<AuthResult>> {
    let result = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(success("토큰이 갱신되었습니다", result))
}

/// POST /api/auth/social
pub async fn social_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SocialLoginRequest>,
) -> ApiResult<Envelope<AuthResult>> {
    let result = state
        .auth_service
        .social_login(req.provider, &req.access_token)
        .await?;
    Ok(success("로그인되었습니다", result))
}
