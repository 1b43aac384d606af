//! Saved card handlers.

use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use staybook_entity::card::Card;

use crate::dto::request::RegisterCardRequest;
use crate::dto::response::{Envelope, done, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Path, ValidatedJson};
use crate::state::AppState;

/// GET /api/cards
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Envelope<Vec<Card>>> {
    let cards = state.card_service.list(&auth).await?;
    Ok(success("조회되었습니다", cards))
}

/// POST /api/cards
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RegisterCardRequest>,
) -> ApiResult<(StatusCode, Envelope<Card>)> {
    let card = state.card_service.register(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, success("카드가 등록되었습니다", card)))
}

/// DELETE /api/cards/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Envelope<()>> {
    state.card_service.delete(&auth, id).await?;
    Ok(done("카드가 삭제되었습니다"))
}

/// PATCH /api/cards/{id}/default
pub async fn set_default(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Envelope<Card>> {
    let card = state.card_service.set_default(&auth, id).await?;
    Ok(success("기본 카드로 설정되었습니다", card))
}
