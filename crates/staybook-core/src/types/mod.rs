//! Shared types used across the StayBook workspace.

pub mod pagination;
pub mod response;

pub use pagination::{PageRequest, PageResponse};
pub use response::{ApiResponse, ResultCode};
