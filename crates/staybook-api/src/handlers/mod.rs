//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod business;
pub mod card;
pub mod coupon;
pub mod health;
pub mod hotel;
pub mod payment;
pub mod reservation;
pub mod review;
pub mod support;
pub mod user;
pub mod wishlist;
