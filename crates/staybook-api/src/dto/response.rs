//! Response DTOs.
//!
//! Entities serialize directly in camelCase; only payloads without an
//! entity behind them live here.

use axum::Json;
use serde::{Deserialize, Serialize};

use staybook_core::types::ApiResponse;

/// Handler body type for envelope responses.
pub type Envelope<T> = Json<ApiResponse<T>>;

/// Wraps `data` in a SUCCESS envelope.
pub fn success<T>(message: &str, data: T) -> Envelope<T> {
    Json(ApiResponse::success(message, data))
}

/// SUCCESS envelope with `data: null`.
pub fn done(message: &str) -> Envelope<()> {
    Json(ApiResponse::ok(message))
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

