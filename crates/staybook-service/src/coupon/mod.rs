//! Coupon preview, listing, and administration.

pub mod service;

pub use service::{CouponPreview, CouponService, CreateCouponRequest};
