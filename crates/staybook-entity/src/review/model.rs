//! Review entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A guest review of a hotel, tied to one reservation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique review identifier.
    pub id: Uuid,
    /// Author.
    pub user_id: Uuid,
    /// Reviewed hotel.
    pub hotel_id: Uuid,
    /// Stay being reviewed. At most one review per reservation.
    pub reservation_id: Uuid,
    /// Rating from 1 to 5.
    pub rating: i32,
    /// Review text.
    pub content: String,
    /// When the review was written.
    pub created_at: DateTime<Utc>,
}

/// A review with its author's display name, for hotel pages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithAuthor {
    /// The review row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    /// Author display name.
    pub author_name: String,
}
