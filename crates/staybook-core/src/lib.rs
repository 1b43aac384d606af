//! # staybook-core
//!
//! Core crate for StayBook. Contains configuration schemas, the unified
//! error system, and the pagination and response-envelope types shared by
//! every other crate.
//!
//! This crate has **no** internal dependencies on other StayBook crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
