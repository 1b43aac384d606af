//! Payment handlers.

use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use staybook_core::types::pagination::PageResponse;
use staybook_entity::payment::Payment;

use crate::dto::request::{
    CancelRequest, ConfirmPaymentRequest, CreatePaymentRequest, RefundRequest, WebhookRequest,
};
use crate::dto::response::{Envelope, success};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams, Path, Query, ValidatedJson};
use crate::state::AppState;

/// POST /api/payments
pub async fn create_intent(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePaymentRequest>,
) -> ApiResult<(StatusCode, Envelope<Payment>)> {
    let payment = state
        .payment_service
        .create_intent(&auth, req.reservation_id)
        .await?;
    Ok((StatusCode::CREATED, success("결제가 생성되었습니다", payment)))
}

/// POST /api/payments/confirm
pub async fn confirm(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ConfirmPaymentRequest>,
) -> ApiResult<Envelope<Payment>> {
    let payment = state.payment_service.confirm(&auth, req.into()).await?;
    Ok(success("결제가 승인되었습니다", payment))
}

/// POST /api/payments/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Option<ValidatedJson<CancelRequest>>,
) -> ApiResult<Envelope<Payment>> {
    let reason = body.and_then(|ValidatedJson(req)| req.reason);
    let payment = state.payment_service.cancel(&auth, id, reason).await?;
    Ok(success("결제가 취소되었습니다", payment))
}

/// POST /api/payments/{id}/refund
pub async fn refund(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Option<ValidatedJson<RefundRequest>>,
) -> ApiResult<Envelope<Payment>> {
    let req = body.map(|ValidatedJson(req)| req).unwrap_or_default();
    let payment = state
        .payment_service
        .refund(&auth, id, req.amount, req.reason)
        .await?;
    Ok(success("환불이 완료되었습니다", payment))
}

/// GET /api/payments/my
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Envelope<PageResponse<Payment>>> {
    let page = state
        .payment_service
        .list_mine(&auth, &params.into_page_request())
        .await?;
    Ok(success("조회되었습니다", page))
}

/// POST /api/payments/webhook
///
/// Unauthenticated. The payment state is always re-fetched from the gateway.
pub async fn webhook(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<WebhookRequest>,
) -> ApiResult<Envelope<Payment>> {
    tracing::info!(
        event_type = req.event_type.as_deref().unwrap_or("unknown"),
        order_id = %req.data.order_id,
        "Payment webhook received"
    );
    let payment = state
        .payment_service
        .handle_webhook(&req.data.payment_key, &req.data.order_id)
        .await?;
    Ok(success("처리되었습니다", payment))
}
