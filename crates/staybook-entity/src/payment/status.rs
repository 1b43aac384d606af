//! Payment record status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentRecordStatus {
    /// Intent created, waiting for gateway confirmation.
    Pending,
    /// Captured by the gateway.
    #[serde(alias = "completed")]
    Paid,
    /// The gateway rejected the payment.
    Failed,
    /// Fully cancelled before settlement.
    Cancelled,
    /// Refunded (fully or partially).
    Refunded,
}

impl PaymentRecordStatus {
    /// Check if the record is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Cancelled | Self::Refunded)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_alias() {
        let status: PaymentRecordStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, PaymentRecordStatus::Paid);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"paid\"");
    }
}
