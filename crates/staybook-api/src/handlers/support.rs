//! Public support handlers: notices, FAQs, newsletter.

use axum::extract::State;
use uuid::Uuid;

use staybook_core::types::pagination::PageResponse;
use staybook_entity::support::{Faq, NewsletterSubscription, Notice};

use crate::dto::request::{FaqQuery, NewsletterRequest};
use crate::dto::response::{Envelope, done, success};
use crate::error::ApiResult;
use crate::extractors::{PaginationParams, Path, Query, ValidatedJson};
use crate::state::AppState;

/// GET /api/notices
pub async fn list_notices(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Envelope<PageResponse<Notice>>> {
    let notices = state
        .support_service
        .list_notices(&params.into_page_request())
        .await?;
    Ok(success("조회되었습니다", notices))
}

/// GET /api/notices/{id}
pub async fn get_notice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Envelope<Notice>> {
    let notice = state.support_service.get_notice(id).await?;
    Ok(success("조회되었습니다", notice))
}

/// GET /api/faqs
pub async fn list_faqs(
    State(state): State<AppState>,
    Query(query): Query<FaqQuery>,
) -> ApiResult<Envelope<Vec<Faq>>> {
    let faqs = state
        .support_service
        .list_faqs(query.category.as_deref())
        .await?;
    Ok(success("조회되었습니다", faqs))
}

/// POST /api/newsletter/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewsletterRequest>,
) -> ApiResult<Envelope<NewsletterSubscription>> {
    let subscription = state.support_service.subscribe(&req.email).await?;
    Ok(success("뉴스레터 구독이 완료되었습니다", subscription))
}

/// POST /api/newsletter/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewsletterRequest>,
) -> ApiResult<Envelope<()>> {
    state.support_service.unsubscribe(&req.email).await?;
    Ok(done("뉴스레터 구독이 해지되었습니다"))
}
