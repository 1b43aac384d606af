//! Payment record repository implementation.
//!
//! Every status change is a conditional update on the current status, so a
//! second callback for the same payment finds no matching row and becomes a
//! no-op.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_entity::payment::{NewPayment, Payment, PaymentRecordStatus};

/// Repository for payment records.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a payment by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find payment", e))
    }

    /// Find a payment by merchant order id.
    pub async fn find_by_order_id(&self, order_id: &str) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE order_id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find payment by order id", e)
            })
    }

    /// A user's payments, newest first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Payment>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count payments", e))?;

        let items = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list payments", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    /// Insert a payment record.
    pub async fn insert<'e, E>(&self, executor: E, data: &NewPayment) -> AppResult<Payment>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments \
                (user_id, reservation_id, order_id, payment_key, amount, discount, \
                 final_amount, method, status, paid_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.reservation_id)
        .bind(&data.order_id)
        .bind(&data.payment_key)
        .bind(data.amount)
        .bind(data.discount)
        .bind(data.final_amount)
        .bind(&data.method)
        .bind(data.status)
        .bind(data.paid_at)
        .fetch_one(executor)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("payments_order_id_key") =>
            {
                AppError::conflict("이미 사용된 주문번호입니다")
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("payments_one_open_per_reservation") =>
            {
                AppError::conflict("이미 진행 중인 결제가 있습니다")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert payment", e),
        })
    }

    /// `pending` → `paid`. Returns `None` if the payment was not pending.
    pub async fn mark_paid<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payment_key: &str,
        method: Option<&str>,
        paid_at: DateTime<Utc>,
    ) -> AppResult<Option<Payment>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments \
             SET status = 'paid', payment_key = $2, method = COALESCE($3, method), \
                 paid_at = $4, failure_reason = NULL, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(id)
        .bind(payment_key)
        .bind(method)
        .bind(paid_at)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark payment paid", e))
    }

    /// `pending` → `failed`. Returns `None` if the payment was not pending.
    pub async fn mark_failed<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payment_key: Option<&str>,
        reason: &str,
    ) -> AppResult<Option<Payment>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments \
             SET status = 'failed', payment_key = COALESCE($2, payment_key), \
                 failure_reason = $3, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(id)
        .bind(payment_key)
        .bind(reason)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark payment failed", e)
        })
    }

    /// The pending payment of a reservation, if one is open.
    pub async fn find_pending_for_reservation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reservation_id: Uuid,
    ) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE reservation_id = $1 AND status = 'pending' \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(reservation_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find pending payment", e)
        })
    }

    /// Fail every pending payment of a reservation. Returns how many changed.
    pub async fn fail_pending_for_reservation<'e, E>(
        &self,
        executor: E,
        reservation_id: Uuid,
        reason: &str,
    ) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE payments SET status = 'failed', failure_reason = $2, updated_at = NOW() \
             WHERE reservation_id = $1 AND status = 'pending'",
        )
        .bind(reservation_id)
        .bind(reason)
        .execute(executor)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fail pending payments", e)
        })?;
        Ok(result.rows_affected())
    }

    /// `paid` → `cancelled` or `refunded`, recording the refund. Returns
    /// `None` if the payment was not paid.
    pub async fn mark_refunded<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: PaymentRecordStatus,
        amount: i64,
        reason: Option<&str>,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Payment>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments \
             SET status = $2, refund_amount = $3, refund_reason = $4, refunded_at = $5, \
                 updated_at = NOW() \
             WHERE id = $1 AND status = 'paid' \
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(amount)
        .bind(reason)
        .bind(at)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to refund payment", e))
    }
}
