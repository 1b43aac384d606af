//! Saved payment cards. Only brand and last four digits are persisted.

pub mod number;
pub mod service;

pub use number::{CardBrand, luhn_valid};
pub use service::{CardService, RegisterCardRequest};
