//! Notice model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A site announcement.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Unique notice identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Pinned notices are listed first.
    pub is_pinned: bool,
    /// Publishing admin.
    pub author_id: Option<Uuid>,
    /// When the notice was published.
    pub created_at: DateTime<Utc>,
    /// When the notice was last edited.
    pub updated_at: DateTime<Utc>,
}
