//! Newsletter subscription model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A newsletter subscription, unique per email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    /// Unique subscription identifier.
    pub id: Uuid,
    /// Subscriber email.
    pub email: String,
    /// Currently subscribed.
    pub subscribed: bool,
    /// First subscription time.
    pub created_at: DateTime<Utc>,
    /// Last change.
    pub updated_at: DateTime<Utc>,
}
