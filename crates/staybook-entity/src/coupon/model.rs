//! Coupon entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "discount_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Flat amount in won.
    Amount,
    /// Percentage of the order amount.
    Percent,
}

/// A discount coupon.
///
/// Public coupons are visible to everyone; a coupon with an `owner_id` is
/// personal and single-use for that user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Unique coupon identifier.
    pub id: Uuid,
    /// Redemption code, stored uppercase.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Flat or percentage discount.
    pub discount_type: DiscountType,
    /// Won for `Amount`, percent for `Percent`.
    pub discount_value: i64,
    /// Minimum order amount.
    pub min_amount: i64,
    /// Cap for percentage discounts.
    pub max_discount: Option<i64>,
    /// Start of validity.
    pub valid_from: DateTime<Utc>,
    /// End of validity.
    pub valid_until: DateTime<Utc>,
    /// Maximum redemptions; `None` means unlimited.
    pub usage_limit: Option<i32>,
    /// Redemptions so far. Only ever incremented.
    pub used_count: i32,
    /// Visible to every user.
    pub is_public: bool,
    /// Personal owner.
    pub owner_id: Option<Uuid>,
    /// When the coupon was created.
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    /// Whether `user_id` can see this coupon.
    pub fn is_visible_to(&self, user_id: Uuid) -> bool {
        self.is_public || self.owner_id == Some(user_id)
    }

    /// Whether the coupon is personal.
    pub fn is_personal(&self) -> bool {
        self.owner_id.is_some()
    }
}

/// Data for creating a coupon.
#[derive(Debug, Clone)]
pub struct NewCoupon {
    /// Code, normalized to uppercase by the caller.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Discount kind.
    pub discount_type: DiscountType,
    /// Discount value.
    pub discount_value: i64,
    /// Minimum order amount.
    pub min_amount: i64,
    /// Percentage cap.
    pub max_discount: Option<i64>,
    /// Start of validity.
    pub valid_from: DateTime<Utc>,
    /// End of validity.
    pub valid_until: DateTime<Utc>,
    /// Redemption limit.
    pub usage_limit: Option<i32>,
    /// Public flag.
    pub is_public: bool,
    /// Personal owner.
    pub owner_id: Option<Uuid>,
}
