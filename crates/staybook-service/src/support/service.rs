//! Customer support content.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use staybook_core::error::AppError;
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_database::repositories::{FaqRepository, NewsletterRepository, NoticeRepository};
use staybook_entity::support::{Faq, NewsletterSubscription, Notice};

use crate::auth::service::normalize_email;
use crate::context::RequestContext;

/// Notices, FAQs, and newsletter subscriptions.
#[derive(Debug, Clone)]
pub struct SupportService {
    notice_repo: Arc<NoticeRepository>,
    faq_repo: Arc<FaqRepository>,
    newsletter_repo: Arc<NewsletterRepository>,
}

impl SupportService {
    /// Creates a new support service.
    pub fn new(
        notice_repo: Arc<NoticeRepository>,
        faq_repo: Arc<FaqRepository>,
        newsletter_repo: Arc<NewsletterRepository>,
    ) -> Self {
        Self {
            notice_repo,
            faq_repo,
            newsletter_repo,
        }
    }

    pub async fn list_notices(&self, page: &PageRequest) -> AppResult<PageResponse<Notice>> {
        self.notice_repo.find_all(page).await
    }

    pub async fn get_notice(&self, id: Uuid) -> AppResult<Notice> {
        self.notice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("공지사항을 찾을 수 없습니다"))
    }

    /// Publish a notice (admin).
    pub async fn create_notice(
        &self,
        ctx: &RequestContext,
        title: &str,
        content: &str,
        is_pinned: bool,
    ) -> AppResult<Notice> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(AppError::validation("제목과 내용을 입력해주세요"));
        }
        let notice = self
            .notice_repo
            .create(title.trim(), content, is_pinned, ctx.user_id)
            .await?;
        info!(notice_id = %notice.id, admin = %ctx.user_id, "Notice published");
        Ok(notice)
    }

    pub async fn list_faqs(&self, category: Option<&str>) -> AppResult<Vec<Faq>> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        self.faq_repo.find_all(category).await
    }

    /// Add an FAQ entry (admin).
    pub async fn create_faq(
        &self,
        category: &str,
        question: &str,
        answer: &str,
        sort_order: i32,
    ) -> AppResult<Faq> {
        if category.trim().is_empty() || question.trim().is_empty() || answer.trim().is_empty() {
            return Err(AppError::validation("카테고리, 질문, 답변을 모두 입력해주세요"));
        }
        self.faq_repo
            .create(category.trim(), question.trim(), answer, sort_order)
            .await
    }

    /// Subscribe an email. Subscribing twice keeps one subscription.
    pub async fn subscribe(&self, email: &str) -> AppResult<NewsletterSubscription> {
        let email = normalize_email(email)?;
        self.newsletter_repo.subscribe(&email).await
    }

    /// Unsubscribe an email. Unknown addresses are not an error.
    pub async fn unsubscribe(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email)?;
        let changed = self.newsletter_repo.unsubscribe(&email).await?;
        info!(changed, "Newsletter unsubscribe");
        Ok(())
    }
}
