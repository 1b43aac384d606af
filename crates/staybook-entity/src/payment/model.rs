//! Payment record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::PaymentRecordStatus;

/// A payment attempt for a reservation, correlated with the gateway by
/// `order_id` and `payment_key`.
///
/// Serializes as [`PaymentView`], with the refund columns grouped under
/// `refund`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(into = "PaymentView")]
pub struct Payment {
    /// Unique payment identifier.
    pub id: Uuid,
    /// Paying user.
    pub user_id: Uuid,
    /// Reservation being paid.
    pub reservation_id: Uuid,
    /// Merchant order id sent to the gateway. Unique.
    pub order_id: String,
    /// Gateway payment key, known after confirmation.
    pub payment_key: Option<String>,
    /// Amount before discount.
    pub amount: i64,
    /// Discount applied.
    pub discount: i64,
    /// Amount actually charged.
    pub final_amount: i64,
    /// Payment method reported by the gateway.
    pub method: Option<String>,
    /// Record status.
    pub status: PaymentRecordStatus,
    /// When the gateway captured the payment.
    pub paid_at: Option<DateTime<Utc>>,
    /// Refunded amount.
    pub refund_amount: Option<i64>,
    /// Refund reason.
    pub refund_reason: Option<String>,
    /// When the refund happened.
    pub refunded_at: Option<DateTime<Utc>>,
    /// Gateway failure message.
    pub failure_reason: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Refund details grouped for API output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    /// Refunded amount.
    pub amount: i64,
    /// Reason given.
    pub reason: Option<String>,
    /// When the refund happened.
    pub refunded_at: DateTime<Utc>,
}

/// API shape of a [`Payment`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reservation_id: Uuid,
    pub order_id: String,
    pub payment_key: Option<String>,
    pub amount: i64,
    pub discount: i64,
    pub final_amount: i64,
    pub method: Option<String>,
    pub status: PaymentRecordStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub refund: Option<Refund>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        let refund = payment.refund();
        Self {
            id: payment.id,
            user_id: payment.user_id,
            reservation_id: payment.reservation_id,
            order_id: payment.order_id,
            payment_key: payment.payment_key,
            amount: payment.amount,
            discount: payment.discount,
            final_amount: payment.final_amount,
            method: payment.method,
            status: payment.status,
            paid_at: payment.paid_at,
            refund,
            failure_reason: payment.failure_reason,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

impl Payment {
    /// Refund details, if the payment was cancelled or refunded.
    pub fn refund(&self) -> Option<Refund> {
        match (self.refund_amount, self.refunded_at) {
            (Some(amount), Some(refunded_at)) => Some(Refund {
                amount,
                reason: self.refund_reason.clone(),
                refunded_at,
            }),
            _ => None,
        }
    }

    /// Whether `user_id` made this payment.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Data for inserting a payment record.
#[derive(Debug, Clone)]
pub struct NewPayment {
    /// Paying user.
    pub user_id: Uuid,
    /// Reservation.
    pub reservation_id: Uuid,
    /// Merchant order id.
    pub order_id: String,
    /// Gateway key, when already known.
    pub payment_key: Option<String>,
    /// Amount before discount.
    pub amount: i64,
    /// Discount.
    pub discount: i64,
    /// Charged amount.
    pub final_amount: i64,
    /// Method.
    pub method: Option<String>,
    /// Initial status.
    pub status: PaymentRecordStatus,
    /// Capture time for records created already paid.
    pub paid_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment() -> Payment {
        let now = Utc::now();
        Payment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            reservation_id: Uuid::new_v4(),
            order_id: "SB-1".into(),
            payment_key: Some("pk_1".into()),
            amount: 200_000,
            discount: 0,
            final_amount: 200_000,
            method: None,
            status: PaymentRecordStatus::Paid,
            paid_at: Some(now),
            refund_amount: None,
            refund_reason: None,
            refunded_at: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_refund_serialized_as_object() {
        let mut refunded = payment();
        refunded.status = PaymentRecordStatus::Refunded;
        refunded.refund_amount = Some(50_000);
        refunded.refund_reason = Some("부분 환불".into());
        refunded.refunded_at = Some(Utc::now());

        let json = serde_json::to_value(&refunded).unwrap();
        assert_eq!(json["status"], "refunded");
        assert_eq!(json["finalAmount"], 200_000);
        assert_eq!(json["refund"]["amount"], 50_000);
        assert_eq!(json["refund"]["reason"], "부분 환불");
        assert!(json["refund"]["refundedAt"].is_string());
        assert!(json.get("refundAmount").is_none());
    }

    #[test]
    fn test_no_refund_serializes_null() {
        let json = serde_json::to_value(payment()).unwrap();
        assert!(json["refund"].is_null());
        assert_eq!(json["orderId"], "SB-1");
    }
}
