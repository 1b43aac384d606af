//! Coupon repository implementation.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_entity::coupon::{Coupon, NewCoupon};

/// Repository for coupons.
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: PgPool,
}

impl CouponRepository {
    /// Create a new coupon repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a coupon by code (case-insensitive).
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Coupon>> {
        sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE code = UPPER($1)")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find coupon", e))
    }

    /// Load a coupon by code under a row lock.
    pub async fn lock_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> AppResult<Option<Coupon>> {
        sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE code = UPPER($1) FOR UPDATE")
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock coupon", e))
    }

    /// Record one redemption. Returns `false` when the limit was already hit.
    pub async fn increment_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE coupons SET used_count = used_count + 1 \
             WHERE id = $1 AND (usage_limit IS NULL OR used_count < usage_limit)",
        )
        .bind(id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to redeem coupon", e))?;
        Ok(result.rows_affected() == 1)
    }

    /// Coupons a user can see: public ones plus their own.
    pub async fn find_visible_to(&self, user_id: Uuid) -> AppResult<Vec<Coupon>> {
        sqlx::query_as::<_, Coupon>(
            "SELECT * FROM coupons WHERE is_public OR owner_id = $1 ORDER BY valid_until ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list coupons", e))
    }

    /// Every coupon, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Coupon>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coupons")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count coupons", e))?;

        let items = sqlx::query_as::<_, Coupon>(
            "SELECT * FROM coupons ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list coupons", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    /// Create a coupon.
    pub async fn create(&self, data: &NewCoupon) -> AppResult<Coupon> {
        sqlx::query_as::<_, Coupon>(
            "INSERT INTO coupons \
                (code, name, description, discount_type, discount_value, min_amount, \
                 max_discount, valid_from, valid_until, usage_limit, is_public, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING *",
        )
        .bind(&data.code)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.discount_type)
        .bind(data.discount_value)
        .bind(data.min_amount)
        .bind(data.max_discount)
        .bind(data.valid_from)
        .bind(data.valid_until)
        .bind(data.usage_limit)
        .bind(data.is_public)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("coupons_code_key") => {
                AppError::conflict(format!("이미 존재하는 쿠폰 코드입니다: {}", data.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create coupon", e),
        })
    }
}
