//! Admin review of business applications.

use axum::extract::State;
use uuid::Uuid;

use staybook_core::types::pagination::PageResponse;
use staybook_entity::business::BusinessApplication;
use staybook_service::business::ReviewDecision;

use crate::dto::request::{ApplicationListQuery, ReviewApplicationRequest};
use crate::dto::response::{Envelope, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Path, Query, ValidatedJson};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/business-applications
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ApplicationListQuery>,
) -> ApiResult<Envelope<PageResponse<BusinessApplication>>> {
    require_admin(&auth)?;
    let page = query.page_request();
    let applications = state.business_service.list(query.status, &page).await?;
    Ok(success("조회되었습니다", applications))
}

/// PATCH /api/admin/business-applications/{id}
pub async fn review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ReviewApplicationRequest>,
) -> ApiResult<Envelope<BusinessApplication>> {
    require_admin(&auth)?;
    let decision = ReviewDecision::try_from(req)?;
    let application = state.business_service.review(&auth, id, decision).await?;
    Ok(success("심사가 완료되었습니다", application))
}
