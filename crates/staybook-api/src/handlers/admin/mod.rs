//! Admin-only handlers. Every handler checks `require_admin` first.

pub mod business;
pub mod coupons;
pub mod support;
