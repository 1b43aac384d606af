//! # staybook-entity
//!
//! Domain entity models for StayBook. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`. Entities serialize in camelCase,
//! matching the JSON API.

pub mod business;
pub mod card;
pub mod coupon;
pub mod hotel;
pub mod payment;
pub mod reservation;
pub mod review;
pub mod support;
pub mod user;
pub mod wishlist;
