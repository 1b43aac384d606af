//! Business application handlers for applicants.

use axum::extract::State;
use axum::http::StatusCode;

use staybook_entity::business::BusinessApplication;

use crate::dto::request::SubmitApplicationRequest;
use crate::dto::response::{Envelope, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/business/applications
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<SubmitApplicationRequest>,
) -> ApiResult<(StatusCode, Envelope<BusinessApplication>)> {
    let application = state.business_service.submit(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, success("사업자 신청이 접수되었습니다", application)))
}

/// GET /api/business/applications/my
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Envelope<Vec<BusinessApplication>>> {
    let applications = state.business_service.list_mine(&auth).await?;
    Ok(success("조회되었습니다", applications))
}
