//! Payment gateway abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use staybook_core::error::AppError;

/// Payment state as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayStatus {
    Ready,
    InProgress,
    WaitingForDeposit,
    Done,
    Canceled,
    PartialCanceled,
    Aborted,
    Expired,
    #[serde(other)]
    Unknown,
}

/// A payment as returned by the gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayPayment {
    pub payment_key: String,
    pub order_id: String,
    pub status: GatewayStatus,
    #[serde(default)]
    pub method: Option<String>,
    pub total_amount: i64,
    /// Amount still captured after partial cancellations.
    #[serde(default)]
    pub balance_amount: Option<i64>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
}

impl GatewayPayment {
    /// Amount returned to the customer so far.
    pub fn cancelled_amount(&self) -> i64 {
        match self.balance_amount {
            Some(balance) => self.total_amount - balance,
            None => self.total_amount,
        }
    }
}

/// Outbound calls to the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Approve a payment the customer authorized in the checkout widget.
    async fn confirm(
        &self,
        payment_key: &str,
        order_id: &str,
        amount: i64,
    ) -> Result<GatewayPayment, AppError>;

    /// Look up the current state of a payment.
    async fn fetch(&self, payment_key: &str) -> Result<GatewayPayment, AppError>;

    /// Cancel a payment. `amount` of `None` cancels the full balance.
    async fn cancel(
        &self,
        payment_key: &str,
        reason: &str,
        amount: Option<i64>,
    ) -> Result<GatewayPayment, AppError>;
}
