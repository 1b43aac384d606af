//! Health check handler.

use crate::dto::response::{Envelope, HealthResponse, success};

/// GET /api/health
pub async fn health() -> Envelope<HealthResponse> {
    success(
        "정상",
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}
