//! Payment records and the gateway confirmation flow.
//!
//! A payment record is created `pending`, confirmed against the gateway, and
//! later cancelled or refunded. Webhook deliveries re-fetch the payment from
//! the gateway and go through the same guarded transitions.

pub mod gateway;
pub mod service;
pub mod toss;
pub mod webhook;

pub use gateway::{GatewayPayment, GatewayStatus, PaymentGateway};
pub use service::{ConfirmPaymentRequest, PaymentService};
pub use toss::TossGateway;
pub use webhook::{WebhookAction, webhook_action};
