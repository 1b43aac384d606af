//! Room repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_entity::hotel::{Room, RoomAvailability};

/// Repository for room queries.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }

    /// All rooms of a hotel, cheapest first.
    pub async fn find_by_hotel(&self, hotel_id: Uuid) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE hotel_id = $1 ORDER BY price ASC")
            .bind(hotel_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))
    }

    /// Load a room and hold a row lock on it until the transaction ends.
    ///
    /// Every reservation insert for the room goes through this lock, which
    /// serializes the overlap check and the insert per room.
    pub async fn lock_for_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock room", e))
    }

    /// Rooms of a hotel that fit `guests`, each with the number of holding
    /// reservations overlapping `[check_in, check_out]`.
    pub async fn availability(
        &self,
        hotel_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        guests: i32,
    ) -> AppResult<Vec<RoomAvailability>> {
        sqlx::query_as::<_, RoomAvailability>(
            "SELECT r.*, COUNT(res.id) AS overlap_count \
             FROM rooms r \
             LEFT JOIN reservations res ON res.room_id = r.id \
                  AND res.status IN ('pending', 'confirmed') \
                  AND res.check_in <= $3 AND res.check_out >= $2 \
             WHERE r.hotel_id = $1 AND r.max_guests >= $4 \
             GROUP BY r.id \
             ORDER BY r.price ASC",
        )
        .bind(hotel_id)
        .bind(check_in)
        .bind(check_out)
        .bind(guests)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load room availability", e)
        })
    }
}
