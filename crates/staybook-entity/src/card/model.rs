//! Saved card model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A saved card. Only the brand and the last four digits are stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique card identifier.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Card network, e.g. `visa`.
    pub brand: String,
    /// Last four digits of the number.
    pub last4: String,
    /// Expiry month (1-12).
    pub expiry_month: i32,
    /// Expiry year (four digits).
    pub expiry_year: i32,
    /// User-chosen label.
    pub alias: Option<String>,
    /// Default card for checkout.
    pub is_default: bool,
    /// When the card was saved.
    pub created_at: DateTime<Utc>,
}

/// Data for saving a card.
#[derive(Debug, Clone)]
pub struct NewCard {
    /// Owner.
    pub user_id: Uuid,
    /// Detected brand.
    pub brand: String,
    /// Last four digits.
    pub last4: String,
    /// Expiry month.
    pub expiry_month: i32,
    /// Expiry year.
    pub expiry_year: i32,
    /// Label.
    pub alias: Option<String>,
}
