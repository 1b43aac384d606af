//! Business application service.
//!
//! A user may have one pending application at a time. Approval promotes the
//! applicant to the `business` role in the same transaction.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_database::DatabasePool;
use staybook_database::repositories::{BusinessApplicationRepository, UserRepository};
use staybook_entity::business::{ApplicationStatus, BusinessApplication, NewBusinessApplication};

use crate::context::RequestContext;

/// Input for submitting an application.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitApplicationRequest {
    pub business_name: String,
    pub registration_number: String,
    pub representative: String,
    pub contact_phone: String,
}

/// An admin decision on an application.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected {
        #[serde(rename = "rejectReason")]
        reason: String,
    },
}

/// Submits and reviews business applications.
#[derive(Debug, Clone)]
pub struct BusinessService {
    db: DatabasePool,
    application_repo: Arc<BusinessApplicationRepository>,
    user_repo: Arc<UserRepository>,
}

impl BusinessService {
    /// Creates a new business service.
    pub fn new(
        db: DatabasePool,
        application_repo: Arc<BusinessApplicationRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            db,
            application_repo,
            user_repo,
        }
    }

    /// Submit an application for the caller.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        req: SubmitApplicationRequest,
    ) -> AppResult<BusinessApplication> {
        let user = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("사용자를 찾을 수 없습니다"))?;
        if user.role.is_business_or_admin() {
            return Err(AppError::invalid_state("이미 사업자 권한이 있는 계정입니다"));
        }

        let data = NewBusinessApplication {
            user_id: ctx.user_id,
            business_name: required(&req.business_name, "상호명")?,
            registration_number: normalize_registration_number(&req.registration_number)?,
            representative: required(&req.representative, "대표자명")?,
            contact_phone: required(&req.contact_phone, "연락처")?,
        };

        let application = self.application_repo.create(&data).await?;
        info!(
            application_id = %application.id,
            user_id = %ctx.user_id,
            "Business application submitted"
        );
        Ok(application)
    }

    /// The caller's applications.
    pub async fn list_mine(&self, ctx: &RequestContext) -> AppResult<Vec<BusinessApplication>> {
        self.application_repo.find_by_user(ctx.user_id).await
    }

    /// All applications (admin).
    pub async fn list(
        &self,
        status: Option<ApplicationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BusinessApplication>> {
        self.application_repo.find_all(status, page).await
    }

    /// Approve or reject a pending application (admin).
    pub async fn review(
        &self,
        ctx: &RequestContext,
        application_id: Uuid,
        decision: ReviewDecision,
    ) -> AppResult<BusinessApplication> {
        let (status, reason) = match &decision {
            ReviewDecision::Approved => (ApplicationStatus::Approved, None),
            ReviewDecision::Rejected { reason } => {
                let reason = reason.trim();
                if reason.is_empty() {
                    return Err(AppError::validation("반려 사유를 입력해주세요"));
                }
                (ApplicationStatus::Rejected, Some(reason))
            }
        };

        if self
            .application_repo
            .find_by_id(application_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("신청 내역을 찾을 수 없습니다"));
        }

        let mut tx = self.db.begin().await?;
        let application = self
            .application_repo
            .review(&mut tx, application_id, status, reason, ctx.user_id, Utc::now())
            .await?
            .ok_or_else(|| AppError::invalid_state("이미 처리된 신청입니다"))?;
        if status == ApplicationStatus::Approved {
            self.application_repo
                .promote_applicant(&mut tx, application.user_id)
                .await?;
        }
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit application review", e)
        })?;

        info!(
            application_id = %application_id,
            status = ?status,
            admin = %ctx.user_id,
            "Business application reviewed"
        );
        Ok(application)
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field}을(를) 입력해주세요")));
    }
    Ok(value.to_string())
}

/// Strip dashes and require exactly ten digits.
fn normalize_registration_number(raw: &str) -> AppResult<String> {
    let digits: String = raw.trim().chars().filter(|c| *c != '-').collect();
    if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation("사업자등록번호는 10자리 숫자여야 합니다"));
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_number() {
        assert_eq!(
            normalize_registration_number("123-45-67890").unwrap(),
            "1234567890"
        );
        assert!(normalize_registration_number("123-45-6789").is_err());
        assert!(normalize_registration_number("123-45-6789a").is_err());
    }

    #[test]
    fn test_decision_parsing() {
        let approved: ReviewDecision =
            serde_json::from_str(r#"{"status":"approved"}"#).unwrap();
        assert!(matches!(approved, ReviewDecision::Approved));

        let rejected: ReviewDecision =
            serde_json::from_str(r#"{"status":"rejected","rejectReason":"서류 미비"}"#).unwrap();
        assert!(matches!(rejected, ReviewDecision::Rejected { ref reason } if reason == "서류 미비"));
    }
}
