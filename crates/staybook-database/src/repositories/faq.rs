//! FAQ repository implementation.

use sqlx::PgPool;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_entity::support::Faq;

/// Repository for FAQs.
#[derive(Debug, Clone)]
pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    /// Create a new FAQ repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// FAQs, optionally limited to one category, in display order.
    pub async fn find_all(&self, category: Option<&str>) -> AppResult<Vec<Faq>> {
        sqlx::query_as::<_, Faq>(
            "SELECT * FROM faqs WHERE ($1::text IS NULL OR category = $1) \
             ORDER BY category ASC, sort_order ASC, created_at ASC",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list FAQs", e))
    }

    /// Create an FAQ entry.
    pub async fn create(
        &self,
        category: &str,
        question: &str,
        answer: &str,
        sort_order: i32,
    ) -> AppResult<Faq> {
        sqlx::query_as::<_, Faq>(
            "INSERT INTO faqs (category, question, answer, sort_order) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(category)
        .bind(question)
        .bind(answer)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create FAQ", e))
    }
}
