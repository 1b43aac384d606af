//! Wishlist repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_entity::hotel::Hotel;

/// Repository for saved hotels.
#[derive(Debug, Clone)]
pub struct WishlistRepository {
    pool: PgPool,
}

impl WishlistRepository {
    /// Create a new wishlist repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Save a hotel. Saving twice is a no-op; returns whether a row was added.
    pub async fn add(&self, user_id: Uuid, hotel_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO wishlists (user_id, hotel_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, hotel_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(hotel_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add wishlist", e))?;
        Ok(result.rows_affected() == 1)
    }

    /// Remove a saved hotel; returns whether a row was deleted.
    pub async fn remove(&self, user_id: Uuid, hotel_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND hotel_id = $2")
            .bind(user_id)
            .bind(hotel_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove wishlist", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Hotels saved by a user, most recently saved first.
    pub async fn find_hotels(&self, user_id: Uuid) -> AppResult<Vec<Hotel>> {
        sqlx::query_as::<_, Hotel>(
            "SELECT h.* FROM hotels h JOIN wishlists w ON w.hotel_id = h.id \
             WHERE w.user_id = $1 ORDER BY w.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list wishlist", e))
    }
}
