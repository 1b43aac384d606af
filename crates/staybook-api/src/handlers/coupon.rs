//! Coupon handlers for guests.

use axum::extract::State;

use staybook_entity::coupon::Coupon;
use staybook_service::coupon::CouponPreview;

use crate::dto::request::ApplyCouponRequest;
use crate::dto::response::{Envelope, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/coupons/apply
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ApplyCouponRequest>,
) -> ApiResult<Envelope<CouponPreview>> {
    let preview = state
        .coupon_service
        .preview(&auth, &req.code, req.amount)
        .await?;
    Ok(success("쿠폰이 적용되었습니다", preview))
}

/// GET /api/coupons/my
pub async fn my_coupons(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Envelope<Vec<Coupon>>> {
    let coupons = state.coupon_service.my_coupons(&auth).await?;
    Ok(success("조회되었습니다", coupons))
}
