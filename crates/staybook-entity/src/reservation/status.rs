//! Reservation and reservation-payment status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Created, waiting for payment confirmation.
    Pending,
    /// Booked and holding inventory.
    Confirmed,
    /// Cancelled by the guest.
    Cancelled,
    /// The stay took place.
    Completed,
    /// The guest never arrived.
    #[sqlx(rename = "no-show")]
    #[serde(rename = "no-show")]
    NoShow,
}

impl ReservationStatus {
    /// Whether a reservation in this status counts against inventory.
    pub fn holds_inventory(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether a review may be written for a reservation in this status.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }

    /// Check if the status can move to `next`.
    ///
    /// Cancellation has its own guarded path and is not covered here.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::NoShow)
        )
    }

    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no-show",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = staybook_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            "no-show" | "noshow" => Ok(Self::NoShow),
            _ => Err(staybook_core::AppError::validation(format!(
                "Invalid reservation status: '{s}'"
            ))),
        }
    }
}

/// Payment state mirrored onto the reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Not yet paid.
    Pending,
    /// Paid in full.
    Paid,
    /// Money returned to the guest.
    Refunded,
    /// The last payment attempt failed.
    Failed,
}

impl PaymentStatus {
    /// Whether a new payment intent may be opened.
    pub fn accepts_payment(&self) -> bool {
        matches!(self, Self::Pending | Self::Failed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
