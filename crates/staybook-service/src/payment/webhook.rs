//! Mapping gateway payment states onto local payment records.

use staybook_entity::payment::PaymentRecordStatus;

use super::gateway::GatewayStatus;

/// What to do with a local payment after a gateway status notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookAction {
    MarkPaid,
    MarkFailed,
    MarkCancelled,
    MarkRefunded,
    Ignore,
}

/// Decide the transition for a local payment in `local` given the gateway's
/// `remote` status. Anything already applied maps to [`WebhookAction::Ignore`],
/// which makes repeated deliveries harmless.
pub fn webhook_action(local: PaymentRecordStatus, remote: GatewayStatus) -> WebhookAction {
    use PaymentRecordStatus as L;

    match (local, remote) {
        (L::Pending, GatewayStatus::Done) => WebhookAction::MarkPaid,
        (L::Pending, GatewayStatus::Aborted | GatewayStatus::Expired) => WebhookAction::MarkFailed,
        (L::Paid, GatewayStatus::Canceled) => WebhookAction::MarkCancelled,
        (L::Paid, GatewayStatus::PartialCanceled) => WebhookAction::MarkRefunded,
        _ => WebhookAction::Ignore,
    }
}
