//! Hotel entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A hotel listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Unique hotel identifier.
    pub id: Uuid,
    /// Business account that owns the hotel.
    pub owner_id: Option<Uuid>,
    /// Hotel name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Street address.
    pub address: String,
    /// City used for search.
    pub city: String,
    /// Amenity tags.
    pub amenities: Vec<String>,
    /// Image URLs.
    pub images: Vec<String>,
    /// Check-in time of day, e.g. `15:00`.
    pub check_in_time: String,
    /// Check-out time of day, e.g. `11:00`.
    pub check_out_time: String,
    /// Average review rating (0 when unrated).
    pub rating: f64,
    /// Number of reviews.
    pub review_count: i32,
    /// When the hotel was created.
    pub created_at: DateTime<Utc>,
    /// When the hotel was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    /// Whether `user_id` owns this hotel.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == Some(user_id)
    }
}

/// A hotel row in search results, with its cheapest bookable room price.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    /// The hotel row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub hotel: Hotel,
    /// Lowest nightly price among its available rooms.
    pub min_price: Option<i64>,
}
