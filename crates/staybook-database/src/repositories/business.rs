//! Business application repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_entity::business::{ApplicationStatus, BusinessApplication, NewBusinessApplication};

/// Repository for business-owner applications.
#[derive(Debug, Clone)]
pub struct BusinessApplicationRepository {
    pool: PgPool,
}

impl BusinessApplicationRepository {
    /// Create a new business application repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an application by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BusinessApplication>> {
        sqlx::query_as::<_, BusinessApplication>(
            "SELECT * FROM business_applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find application", e))
    }

    /// A user's applications, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<BusinessApplication>> {
        sqlx::query_as::<_, BusinessApplication>(
            "SELECT * FROM business_applications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list applications", e))
    }

    /// All applications, optionally filtered by status, oldest pending first.
    pub async fn find_all(
        &self,
        status: Option<ApplicationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BusinessApplication>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM business_applications WHERE ($1::application_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count applications", e)
        })?;

        let items = sqlx::query_as::<_, BusinessApplication>(
            "SELECT * FROM business_applications \
             WHERE ($1::application_status IS NULL OR status = $1) \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list applications", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    /// Submit an application.
    pub async fn create(&self, data: &NewBusinessApplication) -> AppResult<BusinessApplication> {
        sqlx::query_as::<_, BusinessApplication>(
            "INSERT INTO business_applications \
                (user_id, business_name, registration_number, representative, contact_phone) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.business_name)
        .bind(&data.registration_number)
        .bind(&data.representative)
        .bind(&data.contact_phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("business_applications_one_pending") =>
            {
                AppError::conflict("심사 중인 신청이 이미 있습니다")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create application", e),
        })
    }

    /// Record an admin decision on a pending application. Returns `None`
    /// if it was no longer pending.
    pub async fn review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: ApplicationStatus,
        reject_reason: Option<&str>,
        reviewer: Uuid,
        at: DateTime<Utc>,
    ) -> AppResult<Option<BusinessApplication>> {
        sqlx::query_as::<_, BusinessApplication>(
            "UPDATE business_applications \
             SET status = $2, reject_reason = $3, reviewed_by = $4, reviewed_at = $5 \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(reject_reason)
        .bind(reviewer)
        .bind(at)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to review application", e))
    }

    /// Promote the applicant to a business account inside the review
    /// transaction.
    pub async fn promote_applicant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET role = 'business', updated_at = NOW() \
             WHERE id = $1 AND role = 'user'",
        )
        .bind(user_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to promote applicant", e))?;
        Ok(())
    }
}
