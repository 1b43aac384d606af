//! Notice repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_entity::support::Notice;

/// Repository for site notices.
#[derive(Debug, Clone)]
pub struct NoticeRepository {
    pool: PgPool,
}

impl NoticeRepository {
    /// Create a new notice repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Notices, pinned first, then newest.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Notice>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notices")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count notices", e))?;

        let items = sqlx::query_as::<_, Notice>(
            "SELECT * FROM notices ORDER BY is_pinned DESC, created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notices", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    /// Find a notice by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notice>> {
        sqlx::query_as::<_, Notice>("SELECT * FROM notices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notice", e))
    }

    /// Publish a notice.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        is_pinned: bool,
        author_id: Uuid,
    ) -> AppResult<Notice> {
        sqlx::query_as::<_, Notice>(
            "INSERT INTO notices (title, content, is_pinned, author_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(title)
        .bind(content)
        .bind(is_pinned)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notice", e))
    }
}
