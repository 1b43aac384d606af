//! Booking rules shared by reservations, coupons, and the availability
//! listing.
//!
//! Everything in this module is pure: no I/O, no clock reads. Callers pass
//! `now` explicitly, which keeps the rules deterministic and testable.

pub mod coupon;
pub mod lifecycle;
pub mod overlap;
pub mod pricing;

pub use coupon::{CouponEvaluation, evaluate_coupon, is_usable_coupon, normalize_code};
pub use lifecycle::{check_cancellable, check_status_change, initial_state};
pub use overlap::{StayDates, is_bookable, overlaps};
pub use pricing::{PriceQuote, count_nights, quote};
