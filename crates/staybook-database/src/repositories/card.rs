//! Saved card repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_entity::card::{Card, NewCard};

/// Repository for saved cards.
#[derive(Debug, Clone)]
pub struct CardRepository {
    pool: PgPool,
}

impl CardRepository {
    /// Create a new card repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A user's cards, default first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Card>> {
        sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE user_id = $1 ORDER BY is_default DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cards", e))
    }

    /// Save a card. The user's first card becomes the default.
    pub async fn create(&self, data: &NewCard) -> AppResult<Card> {
        sqlx::query_as::<_, Card>(
            "INSERT INTO cards (user_id, brand, last4, expiry_month, expiry_year, alias, is_default) \
             VALUES ($1, $2, $3, $4, $5, $6, \
                     NOT EXISTS (SELECT 1 FROM cards WHERE user_id = $1)) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.brand)
        .bind(&data.last4)
        .bind(data.expiry_month)
        .bind(data.expiry_year)
        .bind(&data.alias)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save card", e))
    }

    /// Delete one of the user's cards; returns whether a row was deleted.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete card", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Make one card the default and clear the flag on the others.
    pub async fn set_default(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Card>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        sqlx::query("UPDATE cards SET is_default = FALSE WHERE user_id = $1 AND id <> $2")
            .bind(user_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear default card", e)
            })?;

        let card = sqlx::query_as::<_, Card>(
            "UPDATE cards SET is_default = TRUE WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set default card", e))?;

        if card.is_some() {
            tx.commit().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
            })?;
        }
        Ok(card)
    }
}
