//! Review handlers.

use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use staybook_entity::review::Review;

use crate::dto::request::CreateReviewRequest;
use crate::dto::response::{Envelope, done, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Path, ValidatedJson};
use crate::state::AppState;

/// POST /api/reviews
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateReviewRequest>,
) -> ApiResult<(StatusCode, Envelope<Review>)> {
    let review = state.review_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, success("리뷰가 등록되었습니다", review)))
}

/// DELETE /api/reviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Envelope<()>> {
    state.review_service.delete(&auth, id).await?;
    Ok(done("리뷰가 삭제되었습니다"))
}
