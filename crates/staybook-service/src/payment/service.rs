//! Payment record tracker.
//!
//! Every state change goes through a conditional update on the current
//! status, so a confirm racing a webhook (or a webhook delivered twice)
//! applies once and the loser sees no matching row.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_database::{DatabasePool, Postgres, Transaction};
use staybook_database::repositories::{PaymentRepository, ReservationRepository};
use staybook_entity::payment::{NewPayment, Payment, PaymentRecordStatus};
use staybook_entity::reservation::{PaymentStatus, ReservationStatus};

use super::gateway::{GatewayPayment, GatewayStatus, PaymentGateway};
use super::webhook::{WebhookAction, webhook_action};
use crate::context::RequestContext;
use crate::reservation::service::new_order_id;

/// Input for confirming a payment after checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmPaymentRequest {
    /// Gateway payment key from the checkout redirect.
    pub payment_key: String,
    /// Merchant order id issued with the intent.
    pub order_id: String,
    /// Amount the customer authorized.
    pub amount: i64,
}

/// Tracks payment records and drives the gateway.
#[derive(Clone)]
pub struct PaymentService {
    db: DatabasePool,
    payment_repo: Arc<PaymentRepository>,
    reservation_repo: Arc<ReservationRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl std::fmt::Debug for PaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService").finish_non_exhaustive()
    }
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(
        db: DatabasePool,
        payment_repo: Arc<PaymentRepository>,
        reservation_repo: Arc<ReservationRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            db,
            payment_repo,
            reservation_repo,
            gateway,
        }
    }

    /// Open a pending payment for one of the caller's reservations.
    pub async fn create_intent(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
    ) -> AppResult<Payment> {
        let mut tx = self.db.begin().await?;
        let reservation = self
            .reservation_repo
            .lock_by_id(&mut tx, reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("예약을 찾을 수 없습니다"))?;

        if !reservation.is_owned_by(ctx.user_id) {
            return Err(AppError::forbidden("본인의 예약만 결제할 수 있습니다"));
        }
        if reservation.status == ReservationStatus::Cancelled {
            return Err(AppError::invalid_state("취소된 예약은 결제할 수 없습니다"));
        }
        if !reservation.payment_status.accepts_payment() {
            return Err(AppError::invalid_state(format!(
                "결제 상태가 '{}'인 예약은 결제할 수 없습니다",
                reservation.payment_status
            )));
        }

        if let Some(open) = self
            .payment_repo
            .find_pending_for_reservation(&mut tx, reservation_id)
            .await?
        {
            debug!(
                payment_id = %open.id,
                reservation_id = %reservation_id,
                "Reusing open payment intent"
            );
            return Ok(open);
        }

        let payment = self
            .payment_repo
            .insert(
                &mut *tx,
                &NewPayment {
                    user_id: ctx.user_id,
                    reservation_id,
                    order_id: new_order_id(),
                    payment_key: None,
                    amount: reservation.total_price + reservation.discount,
                    discount: reservation.discount,
                    final_amount: reservation.total_price,
                    method: None,
                    status: PaymentRecordStatus::Pending,
                    paid_at: None,
                },
            )
            .await?;
        commit(tx).await?;

        info!(
            payment_id = %payment.id,
            order_id = %payment.order_id,
            reservation_id = %reservation_id,
            amount = payment.final_amount,
            "Payment intent created"
        );

        Ok(payment)
    }

    /// Confirm a pending payment with the gateway.
    pub async fn confirm(
        &self,
        ctx: &RequestContext,
        req: ConfirmPaymentRequest,
    ) -> AppResult<Payment> {
        let payment = self
            .payment_repo
            .find_by_order_id(&req.order_id)
            .await?
            .ok_or_else(|| AppError::not_found("결제 정보를 찾을 수 없습니다"))?;

        if !ctx.owns_or_admin(payment.user_id) {
            return Err(AppError::forbidden("본인의 결제만 승인할 수 있습니다"));
        }
        if payment.status != PaymentRecordStatus::Pending {
            return Err(AppError::invalid_state("이미 처리된 결제입니다"));
        }
        if req.amount != payment.final_amount {
            warn!(
                order_id = %payment.order_id,
                expected = payment.final_amount,
                received = req.amount,
                "Payment amount mismatch"
            );
            return Err(AppError::validation("결제 금액이 일치하지 않습니다"));
        }

        let remote = match self
            .gateway
            .confirm(&req.payment_key, &req.order_id, req.amount)
            .await
        {
            Ok(remote) => remote,
            Err(err) => {
                warn!(order_id = %payment.order_id, error = %err, "Gateway confirmation failed");
                self.apply_failed(&payment, Some(&req.payment_key), &err.message)
                    .await?;
                return Err(err);
            }
        };

        self.apply_paid(&payment, &remote)
            .await?
            .ok_or_else(|| AppError::invalid_state("이미 처리된 결제입니다"))
    }

    /// Cancel a paid payment in full.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        payment_id: Uuid,
        reason: Option<String>,
    ) -> AppResult<Payment> {
        let reason = reason.unwrap_or_else(|| "고객 요청".to_string());
        self.settle(ctx, payment_id, &reason, None, PaymentRecordStatus::Cancelled)
            .await
    }

    /// Refund a paid payment, optionally only part of it.
    pub async fn refund(
        &self,
        ctx: &RequestContext,
        payment_id: Uuid,
        amount: Option<i64>,
        reason: Option<String>,
    ) -> AppResult<Payment> {
        let reason = reason.unwrap_or_else(|| "환불 요청".to_string());
        self.settle(ctx, payment_id, &reason, amount, PaymentRecordStatus::Refunded)
            .await
    }

    /// Handle a gateway status-change notification.
    ///
    /// The body is only used to find the payment. Its state is re-fetched
    /// from the gateway before anything is applied.
    pub async fn handle_webhook(&self, payment_key: &str, order_id: &str) -> AppResult<Payment> {
        let remote = self.gateway.fetch(payment_key).await?;
        if remote.order_id != order_id {
            warn!(
                order_id,
                gateway_order_id = %remote.order_id,
                "Webhook order id does not match gateway"
            );
            return Err(AppError::validation("결제 정보가 일치하지 않습니다"));
        }

        let payment = self
            .payment_repo
            .find_by_order_id(&remote.order_id)
            .await?
            .ok_or_else(|| AppError::not_found("결제 정보를 찾을 수 없습니다"))?;

        let action = webhook_action(payment.status, remote.status);
        debug!(
            order_id = %payment.order_id,
            local = %payment.status,
            remote = ?remote.status,
            action = ?action,
            "Webhook received"
        );

        let updated = match action {
            WebhookAction::MarkPaid => self.apply_paid(&payment, &remote).await?,
            WebhookAction::MarkFailed => {
                self.apply_failed(
                    &payment,
                    Some(&remote.payment_key),
                    "결제가 취소되었거나 만료되었습니다",
                )
                .await?
            }
            WebhookAction::MarkCancelled => {
                self.apply_refund(
                    &payment,
                    PaymentRecordStatus::Cancelled,
                    payment.final_amount,
                    Some("결제사 취소"),
                )
                .await?
            }
            WebhookAction::MarkRefunded => {
                self.apply_refund(
                    &payment,
                    PaymentRecordStatus::Refunded,
                    remote.cancelled_amount(),
                    Some("결제사 부분 취소"),
                )
                .await?
            }
            WebhookAction::Ignore => None,
        };

        Ok(updated.unwrap_or(payment))
    }

    /// The caller's payments, newest first.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Payment>> {
        self.payment_repo.find_by_user(ctx.user_id, page).await
    }

    async fn settle(
        &self,
        ctx: &RequestContext,
        payment_id: Uuid,
        reason: &str,
        amount: Option<i64>,
        status: PaymentRecordStatus,
    ) -> AppResult<Payment> {
        let payment = self
            .payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found("결제 정보를 찾을 수 없습니다"))?;

        if !ctx.owns_or_admin(payment.user_id) {
            return Err(AppError::forbidden("본인의 결제만 취소할 수 있습니다"));
        }
        if payment.status != PaymentRecordStatus::Paid {
            return Err(AppError::invalid_state("결제 완료 상태에서만 취소할 수 있습니다"));
        }
        let amount = refund_amount(amount, payment.final_amount)?;

        if let Some(key) = payment.payment_key.as_deref() {
            let partial = (amount < payment.final_amount).then_some(amount);
            self.gateway.cancel(key, reason, partial).await?;
        }

        let updated = self
            .apply_refund(&payment, status, amount, Some(reason))
            .await?
            .ok_or_else(|| AppError::invalid_state("이미 처리된 결제입니다"))?;

        info!(
            payment_id = %payment.id,
            status = %updated.status,
            amount,
            actor = %ctx.user_id,
            "Payment settled"
        );

        Ok(updated)
    }

    /// Record a gateway capture. The captured amount must match the record
    /// and the reservation must still hold its room; otherwise the capture is
    /// voided and the payment fails.
    async fn apply_paid(
        &self,
        payment: &Payment,
        remote: &GatewayPayment,
    ) -> AppResult<Option<Payment>> {
        if remote.total_amount != payment.final_amount {
            warn!(
                order_id = %payment.order_id,
                expected = payment.final_amount,
                captured = remote.total_amount,
                "Gateway amount does not match payment"
            );
            return self
                .reject_capture(payment, remote, AppError::validation("결제 금액이 일치하지 않습니다"))
                .await;
        }

        let paid_at: DateTime<Utc> = remote.approved_at.unwrap_or_else(Utc::now);
        let mut tx = self.db.begin().await?;

        let reservation = self
            .reservation_repo
            .lock_by_id(&mut tx, payment.reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("예약을 찾을 수 없습니다"))?;
        if !reservation.status.holds_inventory() {
            drop(tx);
            warn!(
                order_id = %payment.order_id,
                reservation_id = %reservation.id,
                status = %reservation.status,
                "Capture for a reservation that no longer holds a room"
            );
            return self
                .reject_capture(
                    payment,
                    remote,
                    AppError::invalid_state("취소된 예약은 결제할 수 없습니다"),
                )
                .await;
        }

        let Some(updated) = self
            .payment_repo
            .mark_paid(
                &mut *tx,
                payment.id,
                &remote.payment_key,
                remote.method.as_deref(),
                paid_at,
            )
            .await?
        else {
            return Ok(None);
        };

        self.reservation_repo
            .set_payment_status(&mut *tx, payment.reservation_id, PaymentStatus::Paid)
            .await?;
        self.reservation_repo
            .transition(
                &mut *tx,
                payment.reservation_id,
                ReservationStatus::Pending,
                ReservationStatus::Confirmed,
            )
            .await?;

        commit(tx).await?;
        info!(
            payment_id = %payment.id,
            order_id = %payment.order_id,
            reservation_id = %payment.reservation_id,
            "Payment confirmed"
        );
        Ok(Some(updated))
    }

    /// Void a capture that cannot be applied, fail the payment, and return `err`.
    async fn reject_capture(
        &self,
        payment: &Payment,
        remote: &GatewayPayment,
        err: AppError,
    ) -> AppResult<Option<Payment>> {
        if remote.status == GatewayStatus::Done {
            if let Err(void_err) = self
                .gateway
                .cancel(&remote.payment_key, &err.message, None)
                .await
            {
                error!(
                    order_id = %payment.order_id,
                    error = %void_err,
                    "Failed to void rejected capture"
                );
            }
        }
        self.apply_failed(payment, Some(&remote.payment_key), &err.message)
            .await?;
        Err(err)
    }

    async fn apply_failed(
        &self,
        payment: &Payment,
        payment_key: Option<&str>,
        reason: &str,
    ) -> AppResult<Option<Payment>> {
        let mut tx = self.db.begin().await?;
        let Some(updated) = self
            .payment_repo
            .mark_failed(&mut *tx, payment.id, payment_key, reason)
            .await?
        else {
            return Ok(None);
        };
        self.reservation_repo
            .set_payment_status(&mut *tx, payment.reservation_id, PaymentStatus::Failed)
            .await?;
        commit(tx).await?;
        Ok(Some(updated))
    }

    async fn apply_refund(
        &self,
        payment: &Payment,
        status: PaymentRecordStatus,
        amount: i64,
        reason: Option<&str>,
    ) -> AppResult<Option<Payment>> {
        let mut tx = self.db.begin().await?;
        let Some(updated) = self
            .payment_repo
            .mark_refunded(&mut *tx, payment.id, status, amount, reason, Utc::now())
            .await?
        else {
            return Ok(None);
        };
        self.reservation_repo
            .set_payment_status(&mut *tx, payment.reservation_id, PaymentStatus::Refunded)
            .await?;
        commit(tx).await?;
        Ok(Some(updated))
    }
}

async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit payment update", e))
}

/// Resolve the amount to refund; `None` means the full final amount.
fn refund_amount(requested: Option<i64>, final_amount: i64) -> AppResult<i64> {
    let amount = requested.unwrap_or(final_amount);
    if amount <= 0 {
        return Err(AppError::validation("환불 금액은 0보다 커야 합니다"));
    }
    if amount > final_amount {
        return Err(AppError::validation("환불 금액이 결제 금액을 초과합니다"));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_amount_defaults_to_full() {
        assert_eq!(refund_amount(None, 195_000).unwrap(), 195_000);
        assert_eq!(refund_amount(Some(50_000), 195_000).unwrap(), 50_000);
    }

    #[test]
    fn test_refund_amount_bounds() {
        assert_eq!(
            refund_amount(Some(0), 1_000).unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(
            refund_amount(Some(1_001), 1_000).unwrap_err().kind,
            ErrorKind::Validation
        );
    }
}
