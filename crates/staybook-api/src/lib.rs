//! # staybook-api
//!
//! HTTP API layer for StayBook built on Axum.
//!
//! Provides all REST endpoints, middleware (RBAC, CORS, logging),
//! extractors, DTOs, and error mapping into the `{resultCode, message,
//! data}` envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, build_state_with_gateway, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
