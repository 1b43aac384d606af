//! Hotel browsing handlers. All public.

use axum::extract::State;
use uuid::Uuid;

use staybook_core::types::pagination::PageResponse;
use staybook_entity::hotel::HotelSummary;
use staybook_entity::review::ReviewWithAuthor;
use staybook_service::hotel::{HotelDetail, RoomAvailabilityView};

use crate::dto::request::{AvailabilityQuery, HotelSearchQuery};
use crate::dto::response::{Envelope, success};
use crate::error::ApiResult;
use crate::extractors::{PaginationParams, Path, Query};
use crate::state::AppState;

/// GET /api/hotels
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<HotelSearchQuery>,
) -> ApiResult<Envelope<PageResponse<HotelSummary>>> {
    let (filter, page) = query.into_parts();
    let hotels = state.hotel_service.search(filter, &page).await?;
    Ok(success("조회되었습니다", hotels))
}

/// GET /api/hotels/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Envelope<HotelDetail>> {
    let hotel = state.hotel_service.detail(id).await?;
    Ok(success("조회되었습니다", hotel))
}

/// GET /api/hotels/rooms
pub async fn room_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<Envelope<Vec<RoomAvailabilityView>>> {
    let rooms = state
        .hotel_service
        .availability(query.hotel_id, query.check_in, query.check_out, query.guests)
        .await?;
    Ok(success("조회되었습니다", rooms))
}

/// GET /api/hotels/{id}/reviews
pub async fn reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Envelope<PageResponse<ReviewWithAuthor>>> {
    let reviews = state
        .review_service
        .list_by_hotel(id, &params.into_page_request())
        .await?;
    Ok(success("조회되었습니다", reviews))
}
