//! Hotel browsing and room availability.

pub mod service;

pub use service::{HotelDetail, HotelService, RoomAvailabilityView};
