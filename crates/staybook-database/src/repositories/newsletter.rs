//! Newsletter subscription repository implementation.

use sqlx::PgPool;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_entity::support::NewsletterSubscription;

/// Repository for newsletter subscriptions.
#[derive(Debug, Clone)]
pub struct NewsletterRepository {
    pool: PgPool,
}

impl NewsletterRepository {
    /// Create a new newsletter repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Subscribe an email, re-activating an earlier subscription.
    pub async fn subscribe(&self, email: &str) -> AppResult<NewsletterSubscription> {
        sqlx::query_as::<_, NewsletterSubscription>(
            "INSERT INTO newsletter_subscriptions (email) VALUES (LOWER($1)) \
             ON CONFLICT (email) DO UPDATE SET subscribed = TRUE, updated_at = NOW() \
             RETURNING *",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to subscribe", e))
    }

    /// Unsubscribe an email. Unknown emails are ignored.
    pub async fn unsubscribe(&self, email: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE newsletter_subscriptions SET subscribed = FALSE, updated_at = NOW() \
             WHERE email = LOWER($1) AND subscribed",
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unsubscribe", e))?;
        Ok(result.rows_affected() > 0)
    }
}
