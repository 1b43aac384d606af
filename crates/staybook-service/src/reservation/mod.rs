//! Reservation creation, cancellation, and hotel-side status changes.

pub mod service;

pub use service::{CreateReservationRequest, ReservationService};
