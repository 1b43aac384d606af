//! Admin notice and FAQ publishing.

use axum::extract::State;
use axum::http::StatusCode;

use staybook_entity::support::{Faq, Notice};

use crate::dto::request::{CreateFaqRequest, CreateNoticeRequest};
use crate::dto::response::{Envelope, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/admin/notices
pub async fn create_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateNoticeRequest>,
) -> ApiResult<(StatusCode, Envelope<Notice>)> {
    require_admin(&auth)?;
    let notice = state
        .support_service
        .create_notice(&auth, &req.title, &req.content, req.is_pinned)
        .await?;
    Ok((StatusCode::CREATED, success("공지사항이 등록되었습니다", notice)))
}

/// POST /api/admin/faqs
pub async fn create_faq(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFaqRequest>,
) -> ApiResult<(StatusCode, Envelope<Faq>)> {
    require_admin(&auth)?;
    let faq = state
        .support_service
        .create_faq(&req.category, &req.question, &req.answer, req.sort_order)
        .await?;
    Ok((StatusCode::CREATED, success("FAQ가 등록되었습니다", faq)))
}
