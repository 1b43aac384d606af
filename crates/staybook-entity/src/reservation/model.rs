//! Reservation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{PaymentStatus, ReservationStatus};

/// A guest's booking of one room type for a date range.
///
/// Reservations are never deleted; cancellation is a status change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: Uuid,
    /// Guest who booked.
    pub user_id: Uuid,
    /// Hotel of the room.
    pub hotel_id: Uuid,
    /// Booked room type.
    pub room_id: Uuid,
    /// Start of the stay.
    pub check_in: DateTime<Utc>,
    /// End of the stay; always after `check_in`.
    pub check_out: DateTime<Utc>,
    /// Number of guests.
    pub guests: i32,
    /// Billable nights.
    pub nights: i32,
    /// Nightly price at booking time.
    pub room_price: i64,
    /// Extra charges (breakfast, parking, ...).
    pub extras_price: i64,
    /// Coupon discount.
    pub discount: i64,
    /// Amount charged: `room_price * nights + extras_price - discount`.
    pub total_price: i64,
    /// Redeemed coupon code.
    pub coupon_code: Option<String>,
    /// Guest notes for the hotel.
    pub special_requests: Option<String>,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Mirrored payment state.
    pub payment_status: PaymentStatus,
    /// Reason given on cancellation.
    pub cancel_reason: Option<String>,
    /// When the reservation was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether `user_id` made this reservation.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Data for inserting a reservation. Prices are already computed server-side.
#[derive(Debug, Clone)]
pub struct NewReservation {
    /// Guest.
    pub user_id: Uuid,
    /// Hotel.
    pub hotel_id: Uuid,
    /// Room type.
    pub room_id: Uuid,
    /// Start of the stay.
    pub check_in: DateTime<Utc>,
    /// End of the stay.
    pub check_out: DateTime<Utc>,
    /// Number of guests.
    pub guests: i32,
    /// Billable nights.
    pub nights: i32,
    /// Nightly price.
    pub room_price: i64,
    /// Extra charges.
    pub extras_price: i64,
    /// Coupon discount.
    pub discount: i64,
    /// Final amount.
    pub total_price: i64,
    /// Redeemed coupon code.
    pub coupon_code: Option<String>,
    /// Guest notes.
    pub special_requests: Option<String>,
    /// Initial status.
    pub status: ReservationStatus,
    /// Initial payment status.
    pub payment_status: PaymentStatus,
}
