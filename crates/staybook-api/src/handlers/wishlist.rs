//! Wishlist handlers.

use axum::extract::State;
use uuid::Uuid;

use staybook_entity::hotel::Hotel;

use crate::dto::response::{Envelope, done, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Path};
use crate::state::AppState;

/// GET /api/wishlists
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Envelope<Vec<Hotel>>> {
    let hotels = state.wishlist_service.list(&auth).await?;
    Ok(success("조회되었습니다", hotels))
}

/// POST /api/wishlists/{hotelId}
pub async fn add(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hotel_id): Path<Uuid>,
) -> ApiResult<Envelope<()>> {
    state.wishlist_service.add(&auth, hotel_id).await?;
    Ok(done("찜 목록에 추가되었습니다"))
}

/// DELETE /api/wishlists/{hotelId}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hotel_id): Path<Uuid>,
) -> ApiResult<Envelope<()>> {
    state.wishlist_service.remove(&auth, hotel_id).await?;
    Ok(done("찜 목록에서 삭제되었습니다"))
}
