//! FAQ model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A frequently asked question.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    /// Unique FAQ identifier.
    pub id: Uuid,
    /// Grouping, e.g. `reservation`, `payment`.
    pub category: String,
    /// Question.
    pub question: String,
    /// Answer.
    pub answer: String,
    /// Ascending display order within a category.
    pub sort_order: i32,
    /// When the FAQ was created.
    pub created_at: DateTime<Utc>,
}
