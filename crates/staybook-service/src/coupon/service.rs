//! Coupon service.
//!
//! Previewing never redeems. Redemption happens only inside reservation
//! creation, under the coupon row lock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use staybook_core::error::AppError;
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_database::repositories::CouponRepository;
use staybook_entity::coupon::{Coupon, DiscountType, NewCoupon};

use crate::booking::{evaluate_coupon, is_usable_coupon, normalize_code};
use crate::context::RequestContext;

/// Result of applying a coupon to an amount without redeeming it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPreview {
    /// The coupon that was evaluated.
    pub coupon: Coupon,
    /// Discount it would grant.
    pub discount: i64,
    /// Amount after the discount. May be negative for a flat coupon larger
    /// than the order.
    pub final_amount: i64,
}

/// Input for creating a coupon.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCouponRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_amount: Option<i64>,
    pub max_discount: Option<i64>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub usage_limit: Option<i32>,
    pub is_public: Option<bool>,
    pub owner_id: Option<uuid::Uuid>,
}

/// Coupon lookups and admin management.
#[derive(Debug, Clone)]
pub struct CouponService {
    coupon_repo: Arc<CouponRepository>,
}

impl CouponService {
    /// Creates a new coupon service.
    pub fn new(coupon_repo: Arc<CouponRepository>) -> Self {
        Self { coupon_repo }
    }

    /// Evaluate `code` against `amount` for the caller.
    pub async fn preview(
        &self,
        ctx: &RequestContext,
        code: &str,
        amount: i64,
    ) -> AppResult<CouponPreview> {
        if amount < 0 {
            return Err(AppError::validation("주문 금액은 0 이상이어야 합니다"));
        }
        let code = normalize_code(Some(code))
            .ok_or_else(|| AppError::validation("쿠폰 코드를 입력해주세요"))?;
        let coupon = self
            .coupon_repo
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 쿠폰입니다"))?;

        let evaluation = evaluate_coupon(&coupon, ctx.user_id, Utc::now(), amount)?;
        if evaluation.final_amount < 0 {
            warn!(
                coupon = %coupon.code,
                amount,
                discount = evaluation.discount,
                "Coupon discount exceeds order amount"
            );
        }

        Ok(CouponPreview {
            coupon,
            discount: evaluation.discount,
            final_amount: evaluation.final_amount,
        })
    }

    /// Coupons the caller can use right now.
    pub async fn my_coupons(&self, ctx: &RequestContext) -> AppResult<Vec<Coupon>> {
        let now = Utc::now();
        let coupons = self.coupon_repo.find_visible_to(ctx.user_id).await?;
        Ok(coupons
            .into_iter()
            .filter(|c| is_usable_coupon(c, ctx.user_id, now))
            .collect())
    }

    /// Create a coupon (admin).
    pub async fn create(&self, ctx: &RequestContext, req: CreateCouponRequest) -> AppResult<Coupon> {
        let data = validate_new_coupon(req)?;
        let coupon = self.coupon_repo.create(&data).await?;
        info!(coupon = %coupon.code, admin = %ctx.user_id, "Coupon created");
        Ok(coupon)
    }

    /// All coupons (admin).
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Coupon>> {
        self.coupon_repo.find_all(page).await
    }
}

fn validate_new_coupon(req: CreateCouponRequest) -> AppResult<NewCoupon> {
    let code = normalize_code(Some(&req.code))
        .ok_or_else(|| AppError::validation("쿠폰 코드를 입력해주세요"))?;
    if req.discount_value <= 0 {
        return Err(AppError::validation("할인 값은 0보다 커야 합니다"));
    }
    if req.discount_type == DiscountType::Percent && req.discount_value > 100 {
        return Err(AppError::validation("할인율은 100%를 넘을 수 없습니다"));
    }
    if req.valid_from >= req.valid_until {
        return Err(AppError::validation("유효기간 시작일은 종료일보다 빨라야 합니다"));
    }
    if req.usage_limit.is_some_and(|l| l < 1) {
        return Err(AppError::validation("사용 한도는 1 이상이어야 합니다"));
    }
    let min_amount = req.min_amount.unwrap_or(0);
    if min_amount < 0 || req.max_discount.is_some_and(|m| m < 0) {
        return Err(AppError::validation("금액은 0 이상이어야 합니다"));
    }
    let is_public = req.is_public.unwrap_or(req.owner_id.is_none());
    if !is_public && req.owner_id.is_none() {
        return Err(AppError::validation("비공개 쿠폰은 소유자가 필요합니다"));
    }

    Ok(NewCoupon {
        code,
        name: req.name,
        description: req.description,
        discount_type: req.discount_type,
        discount_value: req.discount_value,
        min_amount,
        max_discount: req.max_discount,
        valid_from: req.valid_from,
        valid_until: req.valid_until,
        usage_limit: req.usage_limit,
        is_public,
        owner_id: req.owner_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use staybook_core::ErrorKind;

    fn request() -> CreateCouponRequest {
        let now = Utc::now();
        CreateCouponRequest {
            code: " welcome10 ".into(),
            name: "Welcome".into(),
            description: None,
            discount_type: DiscountType::Percent,
            discount_value: 10,
            min_amount: None,
            max_discount: Some(20_000),
            valid_from: now,
            valid_until: now + Duration::days(30),
            usage_limit: Some(100),
            is_public: None,
            owner_id: None,
        }
    }

    #[test]
    fn test_new_coupon_normalized() {
        let data = validate_new_coupon(request()).unwrap();
        assert_eq!(data.code, "WELCOME10");
        assert_eq!(data.min_amount, 0);
        assert!(data.is_public);
    }

    #[test]
    fn test_percent_over_hundred_rejected() {
        let mut req = request();
        req.discount_value = 150;
        let err = validate_new_coupon(req).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut req = request();
        std::mem::swap(&mut req.valid_from, &mut req.valid_until);
        assert!(validate_new_coupon(req).is_err());
    }

    #[test]
    fn test_private_coupon_needs_owner() {
        let mut req = request();
        req.is_public = Some(false);
        assert!(validate_new_coupon(req).is_err());

        let mut req = request();
        req.owner_id = Some(uuid::Uuid::new_v4());
        let data = validate_new_coupon(req).unwrap();
        assert!(!data.is_public);
    }
}
