//! Coupon entities.

pub mod model;

pub use model::{Coupon, DiscountType, NewCoupon};
