//! Postgres-backed integration tests.
//!
//! Run with `cargo test --features integration-tests` and
//! `STAYBOOK_TEST_DATABASE_URL` pointing at a disposable database.

#![cfg(feature = "integration-tests")]

mod helpers;

mod auth_test;
mod coupon_test;
mod payment_test;
mod reservation_test;
