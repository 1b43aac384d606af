//! Admin coupon management handlers.

use axum::extract::State;
use axum::http::StatusCode;

use staybook_core::types::pagination::PageResponse;
use staybook_entity::coupon::Coupon;

use crate::dto::request::CreateCouponRequest;
use crate::dto::response::{Envelope, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams, Query, ValidatedJson};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/coupons
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Envelope<PageResponse<Coupon>>> {
    require_admin(&auth)?;
    let coupons = state
        .coupon_service
        .list(&params.into_page_request())
        .await?;
    Ok(success("조회되었습니다", coupons))
}

/// POST /api/admin/coupons
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCouponRequest>,
) -> ApiResult<(StatusCode, Envelope<Coupon>)> {
    require_admin(&auth)?;
    let coupon = state.coupon_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, success("쿠폰이 생성되었습니다", coupon)))
}
