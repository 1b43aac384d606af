//! Coupon eligibility and discount calculation.
//!
//! [`evaluate_coupon`] is the single place where a coupon is judged. The
//! preview endpoint, the "my coupons" listing, and reservation creation all
//! go through it; only reservation creation goes on to redeem.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use staybook_core::error::AppError;
use staybook_core::result::AppResult;
use staybook_entity::coupon::{Coupon, DiscountType};

/// Outcome of applying a coupon to an order amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponEvaluation {
    /// Order amount the coupon was applied to.
    pub amount: i64,
    /// Discount granted.
    pub discount: i64,
    /// `amount - discount`. Not clamped: a flat coupon larger than the
    /// order produces a negative value and the caller decides.
    pub final_amount: i64,
}

/// Evaluate `coupon` for `user_id` at `now` against `amount`.
///
/// Checks run in a fixed order and the first failure wins: visibility,
/// validity window, global usage limit, personal single use, minimum amount.
pub fn evaluate_coupon(
    coupon: &Coupon,
    user_id: Uuid,
    now: DateTime<Utc>,
    amount: i64,
) -> AppResult<CouponEvaluation> {
    check_eligibility(coupon, user_id, now)?;

    if amount < coupon.min_amount {
        return Err(AppError::min_amount(format!(
            "최소 주문 금액 {}원 이상부터 사용할 수 있습니다",
            coupon.min_amount
        )));
    }

    let discount = discount_for(coupon, amount);
    Ok(CouponEvaluation {
        amount,
        discount,
        final_amount: amount - discount,
    })
}

/// Whether the coupon can currently be used by `user_id`, ignoring the
/// order amount. Used to filter the "my coupons" listing.
pub fn is_usable_coupon(coupon: &Coupon, user_id: Uuid, now: DateTime<Utc>) -> bool {
    check_eligibility(coupon, user_id, now).is_ok()
}

/// Trim and uppercase a coupon code; blank means no coupon.
pub fn normalize_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
}

fn check_eligibility(coupon: &Coupon, user_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
    if !coupon.is_visible_to(user_id) {
        return Err(AppError::not_found("존재하지 않는 쿠폰입니다"));
    }

    if now > coupon.valid_until {
        return Err(AppError::expired("만료된 쿠폰입니다"));
    }
    if now < coupon.valid_from {
        return Err(AppError::expired("아직 사용할 수 없는 쿠폰입니다"));
    }

    if let Some(limit) = coupon.usage_limit {
        if coupon.used_count >= limit {
            return Err(AppError::usage_limit_exceeded("쿠폰 사용 한도를 초과했습니다"));
        }
    }

    if coupon.is_personal() && coupon.used_count > 0 {
        return Err(AppError::usage_limit_exceeded("이미 사용한 쿠폰입니다"));
    }

    Ok(())
}

fn discount_for(coupon: &Coupon, amount: i64) -> i64 {
    match coupon.discount_type {
        DiscountType::Percent => {
            let raw = amount.saturating_mul(coupon.discount_value).div_euclid(100);
            match coupon.max_discount {
                Some(cap) => raw.min(cap),
                None => raw,
            }
        }
        DiscountType::Amount => coupon.discount_value,
    }
}
