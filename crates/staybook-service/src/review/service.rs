//! Review service. Writing or deleting a review recomputes the hotel rating
//! in the same transaction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_database::DatabasePool;
use staybook_database::repositories::{HotelRepository, ReservationRepository, ReviewRepository};
use staybook_entity::reservation::Reservation;
use staybook_entity::review::{Review, ReviewWithAuthor};

use crate::context::RequestContext;

/// Input for writing a review.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub reservation_id: Uuid,
    pub rating: i32,
    pub content: String,
}

/// Writes, deletes, and lists reviews.
#[derive(Debug, Clone)]
pub struct ReviewService {
    db: DatabasePool,
    review_repo: Arc<ReviewRepository>,
    reservation_repo: Arc<ReservationRepository>,
    hotel_repo: Arc<HotelRepository>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(
        db: DatabasePool,
        review_repo: Arc<ReviewRepository>,
        reservation_repo: Arc<ReservationRepository>,
        hotel_repo: Arc<HotelRepository>,
    ) -> Self {
        Self {
            db,
            review_repo,
            reservation_repo,
            hotel_repo,
        }
    }

    /// Review a finished stay.
    pub async fn create(&self, ctx: &RequestContext, req: CreateReviewRequest) -> AppResult<Review> {
        if !(1..=5).contains(&req.rating) {
            return Err(AppError::validation("평점은 1에서 5 사이여야 합니다"));
        }
        let content = req.content.trim();
        if content.is_empty() {
            return Err(AppError::validation("리뷰 내용을 입력해주세요"));
        }

        let reservation = self
            .reservation_repo
            .find_by_id(req.reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("예약을 찾을 수 없습니다"))?;
        check_reviewable(&reservation, ctx.user_id, Utc::now())?;

        let mut tx = self.db.begin().await?;
        let review = self
            .review_repo
            .insert(
                &mut tx,
                ctx.user_id,
                reservation.hotel_id,
                reservation.id,
                req.rating,
                content,
            )
            .await?;
        self.hotel_repo
            .refresh_rating(&mut *tx, reservation.hotel_id)
            .await?;
        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit review", e))?;

        info!(
            review_id = %review.id,
            hotel_id = %review.hotel_id,
            rating = review.rating,
            "Review created"
        );
        Ok(review)
    }

    /// Delete a review (author or admin).
    pub async fn delete(&self, ctx: &RequestContext, review_id: Uuid) -> AppResult<()> {
        let review = self
            .review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::not_found("리뷰를 찾을 수 없습니다"))?;
        if !ctx.owns_or_admin(review.user_id) {
            return Err(AppError::forbidden("본인의 리뷰만 삭제할 수 있습니다"));
        }

        let mut tx = self.db.begin().await?;
        if !self.review_repo.delete(&mut tx, review_id).await? {
            return Err(AppError::not_found("리뷰를 찾을 수 없습니다"));
        }
        self.hotel_repo
            .refresh_rating(&mut *tx, review.hotel_id)
            .await?;
        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit review", e))?;

        info!(review_id = %review_id, actor = %ctx.user_id, "Review deleted");
        Ok(())
    }

    /// Reviews of a hotel, newest first.
    pub async fn list_by_hotel(
        &self,
        hotel_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ReviewWithAuthor>> {
        self.review_repo.find_by_hotel(hotel_id, page).await
    }
}

/// A reservation can be reviewed by its guest once the stay has ended.
fn check_reviewable(reservation: &Reservation, user_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
    if !reservation.is_owned_by(user_id) {
        return Err(AppError::forbidden("본인의 예약에만 리뷰를 작성할 수 있습니다"));
    }
    if !reservation.status.is_reviewable() {
        return Err(AppError::invalid_state("이용 완료된 예약에만 리뷰를 작성할 수 있습니다"));
    }
    if reservation.check_out > now {
        return Err(AppError::invalid_state("체크아웃 이후에 리뷰를 작성할 수 있습니다"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use staybook_entity::reservation::{PaymentStatus, ReservationStatus};

    fn stay(owner: Uuid, status: ReservationStatus, check_out: DateTime<Utc>) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            user_id: owner,
            hotel_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            check_in: check_out - Duration::days(1),
            check_out,
            guests: 1,
            nights: 1,
            room_price: 80_000,
            extras_price: 0,
            discount: 0,
            total_price: 80_000,
            coupon_code: None,
            special_requests: None,
            status,
            payment_status: PaymentStatus::Paid,
            cancel_reason: None,
            cancelled_at: None,
            created_at: check_out - Duration::days(5),
            updated_at: check_out - Duration::days(5),
        }
    }

    #[test]
    fn test_finished_stay_is_reviewable() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let r = stay(owner, ReservationStatus::Completed, now - Duration::days(1));
        assert!(check_reviewable(&r, owner, now).is_ok());
    }

    #[test]
    fn test_future_checkout_rejected() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let r = stay(owner, ReservationStatus::Confirmed, now + Duration::days(1));
        assert_eq!(
            check_reviewable(&r, owner, now).unwrap_err().kind,
            ErrorKind::InvalidState
        );
    }

    #[test]
    fn test_cancelled_or_foreign_rejected() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let r = stay(owner, ReservationStatus::Cancelled, now - Duration::days(1));
        assert_eq!(
            check_reviewable(&r, owner, now).unwrap_err().kind,
            ErrorKind::InvalidState
        );
        assert_eq!(
            check_reviewable(&r, Uuid::new_v4(), now).unwrap_err().kind,
            ErrorKind::Forbidden
        );
    }
}
