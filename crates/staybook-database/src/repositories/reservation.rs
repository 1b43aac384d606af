//! Reservation repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_entity::reservation::{NewReservation, PaymentStatus, Reservation, ReservationStatus};

/// Repository for reservation persistence.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a reservation by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find reservation", e)
            })
    }

    /// Load a reservation under a row lock.
    pub async fn lock_by_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock reservation", e)
            })
    }

    /// A user's reservations, newest first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count reservations", e)
            })?;

        let items = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reservations", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    /// Count pending or confirmed reservations of a room whose stay touches
    /// `[check_in, check_out]`. Boundaries are inclusive.
    pub async fn count_overlapping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations \
             WHERE room_id = $1 \
               AND status IN ('pending', 'confirmed') \
               AND check_in <= $3 AND check_out >= $2",
        )
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count overlapping reservations", e)
        })
    }

    /// Insert a reservation.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &NewReservation,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations \
                (user_id, hotel_id, room_id, check_in, check_out, guests, nights, room_price, \
                 extras_price, discount, total_price, coupon_code, special_requests, status, \
                 payment_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.hotel_id)
        .bind(data.room_id)
        .bind(data.check_in)
        .bind(data.check_out)
        .bind(data.guests)
        .bind(data.nights)
        .bind(data.room_price)
        .bind(data.extras_price)
        .bind(data.discount)
        .bind(data.total_price)
        .bind(&data.coupon_code)
        .bind(&data.special_requests)
        .bind(data.status)
        .bind(data.payment_status)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert reservation", e))
    }

    /// Mark a reservation cancelled. Returns `None` when it was already
    /// cancelled by a concurrent request.
    pub async fn cancel<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        reason: Option<&str>,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Reservation>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations \
             SET status = 'cancelled', cancel_reason = $2, cancelled_at = $3, updated_at = NOW() \
             WHERE id = $1 AND status <> 'cancelled' \
             RETURNING *",
        )
        .bind(id)
        .bind(reason)
        .bind(at)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel reservation", e))
    }

    /// Move a reservation from `from` to `to`. Returns `None` if the status
    /// changed underneath.
    pub async fn transition<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> AppResult<Option<Reservation>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update reservation status", e)
        })
    }

    /// Mirror a payment outcome onto the reservation.
    pub async fn set_payment_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE reservations SET payment_status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to update reservation payment status",
                    e,
                )
            })?;
        Ok(())
    }
}
