//! Hotel and room entities.

pub mod model;
pub mod room;

pub use model::{Hotel, HotelSummary};
pub use room::{Room, RoomAvailability, RoomStatus, RoomType};
