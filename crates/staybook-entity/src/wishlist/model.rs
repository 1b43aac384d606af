//! Wishlist entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A hotel saved by a user. Unique per (user, hotel).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Saved hotel.
    pub hotel_id: Uuid,
    /// When the hotel was saved.
    pub created_at: DateTime<Utc>,
}
