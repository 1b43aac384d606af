//! Reservation handlers.

use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use staybook_core::types::pagination::PageResponse;
use staybook_entity::reservation::Reservation;

use crate::dto::request::{CancelRequest, CreateReservationRequest, UpdateReservationStatusRequest};
use crate::dto::response::{Envelope, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams, Path, Query, ValidatedJson};
use crate::middleware::rbac::require_business;
use crate::state::AppState;

/// POST /api/reservations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Envelope<Reservation>)> {
    let reservation = state.reservation_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, success("예약이 완료되었습니다", reservation)))
}

/// GET /api/reservations/my
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Envelope<PageResponse<Reservation>>> {
    let page = state
        .reservation_service
        .list_mine(&auth, &params.into_page_request())
        .await?;
    Ok(success("조회되었습니다", page))
}

/// GET /api/reservations/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Envelope<Reservation>> {
    let reservation = state.reservation_service.get(&auth, id).await?;
    Ok(success("조회되었습니다", reservation))
}

/// PATCH /api/reservations/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Option<ValidatedJson<CancelRequest>>,
) -> ApiResult<Envelope<Reservation>> {
    let reason = body.and_then(|ValidatedJson(req)| req.reason);
    let reservation = state.reservation_service.cancel(&auth, id, reason).await?;
    Ok(success("예약이 취소되었습니다", reservation))
}

/// PATCH /api/reservations/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateReservationStatusRequest>,
) -> ApiResult<Envelope<Reservation>> {
    require_business(&auth)?;
    let reservation = state
        .reservation_service
        .update_status(&auth, id, req.status)
        .await?;
    Ok(success("예약 상태가 변경되었습니다", reservation))
}
