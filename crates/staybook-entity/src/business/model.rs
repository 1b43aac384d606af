//! Business application model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review state of a business application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Waiting for an admin.
    Pending,
    /// Approved; the user became a business account.
    Approved,
    /// Rejected with a reason.
    Rejected,
}

/// A request by a user to become a hotel business owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BusinessApplication {
    /// Unique application identifier.
    pub id: Uuid,
    /// Applicant.
    pub user_id: Uuid,
    /// Registered business name.
    pub business_name: String,
    /// Ten-digit business registration number.
    pub registration_number: String,
    /// Representative's name.
    pub representative: String,
    /// Contact phone.
    pub contact_phone: String,
    /// Review state.
    pub status: ApplicationStatus,
    /// Reason for rejection.
    pub reject_reason: Option<String>,
    /// Reviewing admin.
    pub reviewed_by: Option<Uuid>,
    /// When the application was reviewed.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// When the application was submitted.
    pub created_at: DateTime<Utc>,
}

/// Data for submitting an application.
#[derive(Debug, Clone)]
pub struct NewBusinessApplication {
    /// Applicant.
    pub user_id: Uuid,
    /// Business name.
    pub business_name: String,
    /// Registration number, digits only.
    pub registration_number: String,
    /// Representative.
    pub representative: String,
    /// Contact phone.
    pub contact_phone: String,
}
