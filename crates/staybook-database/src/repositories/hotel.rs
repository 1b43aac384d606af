//! Hotel repository implementation.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_entity::hotel::{Hotel, HotelSummary};

/// Search filters for the hotel listing.
#[derive(Debug, Clone, Default)]
pub struct HotelSearch {
    /// City substring (case-insensitive).
    pub city: Option<String>,
    /// Keyword matched against name, address, and description.
    pub keyword: Option<String>,
}

/// Repository for hotel queries.
#[derive(Debug, Clone)]
pub struct HotelRepository {
    pool: PgPool,
}

impl HotelRepository {
    /// Create a new hotel repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a hotel by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Hotel>> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find hotel", e))
    }

    /// Search hotels with their lowest open room price.
    pub async fn search(
        &self,
        filter: &HotelSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HotelSummary>> {
        let city = filter.city.as_deref().map(|c| format!("%{c}%"));
        let keyword = filter.keyword.as_deref().map(|k| format!("%{k}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM hotels h \
             WHERE ($1::text IS NULL OR h.city ILIKE $1) \
               AND ($2::text IS NULL OR h.name ILIKE $2 OR h.address ILIKE $2 \
                    OR COALESCE(h.description, '') ILIKE $2)",
        )
        .bind(&city)
        .bind(&keyword)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count hotels", e))?;

        let hotels = sqlx::query_as::<_, HotelSummary>(
            "SELECT h.*, \
                    (SELECT MIN(r.price) FROM rooms r \
                      WHERE r.hotel_id = h.id AND r.status = 'available') AS min_price \
             FROM hotels h \
             WHERE ($1::text IS NULL OR h.city ILIKE $1) \
               AND ($2::text IS NULL OR h.name ILIKE $2 OR h.address ILIKE $2 \
                    OR COALESCE(h.description, '') ILIKE $2) \
             ORDER BY h.rating DESC, h.created_at DESC \
             LIMIT $3 OFFSET $4",
        )
        .bind(&city)
        .bind(&keyword)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search hotels", e))?;

        Ok(PageResponse::new(hotels, page, total as u64))
    }

    /// Recompute a hotel's average rating and review count from its reviews.
    pub async fn refresh_rating<'e, E>(&self, executor: E, hotel_id: Uuid) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "UPDATE hotels SET \
                rating = COALESCE((SELECT ROUND(AVG(rating)::numeric, 1)::float8 \
                                   FROM reviews WHERE hotel_id = $1), 0), \
                review_count = (SELECT COUNT(*) FROM reviews WHERE hotel_id = $1), \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(hotel_id)
        .execute(executor)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to refresh hotel rating", e)
        })?;
        Ok(())
    }
}
