//! Review repository implementation.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_entity::review::{Review, ReviewWithAuthor};

/// Repository for hotel reviews.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a review by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find review", e))
    }

    /// Reviews of a hotel with author names, newest first.
    pub async fn find_by_hotel(
        &self,
        hotel_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ReviewWithAuthor>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE hotel_id = $1")
            .bind(hotel_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count reviews", e))?;

        let items = sqlx::query_as::<_, ReviewWithAuthor>(
            "SELECT r.*, u.name AS author_name \
             FROM reviews r JOIN users u ON u.id = r.user_id \
             WHERE r.hotel_id = $1 \
             ORDER BY r.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(hotel_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reviews", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    /// Insert a review.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        hotel_id: Uuid,
        reservation_id: Uuid,
        rating: i32,
        content: &str,
    ) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (user_id, hotel_id, reservation_id, rating, content) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(user_id)
        .bind(hotel_id)
        .bind(reservation_id)
        .bind(rating)
        .bind(content)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("reviews_reservation_id_key") =>
            {
                AppError::conflict("이미 리뷰를 작성한 예약입니다")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert review", e),
        })
    }

    /// Delete a review.
    pub async fn delete(&self, tx: &mut Transaction<'_, Postgres>, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete review", e))?;
        Ok(result.rows_affected() > 0)
    }
}
