//! Room entity model and enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Standard room.
    Standard,
    /// Deluxe room.
    Deluxe,
    /// Suite.
    Suite,
    /// Family room.
    Family,
}

/// Whether a room type accepts reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Open for booking.
    Available,
    /// Closed by the owner.
    Unavailable,
    /// Closed for maintenance.
    Maintenance,
}

impl RoomStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable room type. `total_rooms` is the inventory size and is never
/// decremented; free inventory is derived from overlapping reservations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room identifier.
    pub id: Uuid,
    /// Owning hotel.
    pub hotel_id: Uuid,
    /// Display name.
    pub name: String,
    /// Category.
    pub room_type: RoomType,
    /// Nightly price in won.
    pub price: i64,
    /// Number of identical physical rooms.
    pub total_rooms: i32,
    /// Maximum guests per reservation.
    pub max_guests: i32,
    /// Booking status.
    pub status: RoomStatus,
    /// Amenity tags.
    pub amenities: Vec<String>,
    /// Image URLs.
    pub images: Vec<String>,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Whether the room accepts new reservations at all.
    pub fn is_open(&self) -> bool {
        self.status == RoomStatus::Available
    }
}

/// A room together with the number of reservations overlapping a stay.
#[derive(Debug, Clone, FromRow)]
pub struct RoomAvailability {
    /// The room row.
    #[sqlx(flatten)]
    pub room: Room,
    /// Pending or confirmed reservations overlapping the requested dates.
    pub overlap_count: i64,
}

impl RoomAvailability {
    /// Free units for the requested dates, never negative.
    pub fn available_count(&self) -> i64 {
        (i64::from(self.room.total_rooms) - self.overlap_count).max(0)
    }

    /// Whether at least one unit is free and the room is open.
    pub fn is_available(&self) -> bool {
        self.room.is_open() && self.available_count() > 0
    }
}
