//! Reservation lifecycle service.
//!
//! Creation runs in one transaction: the room row is locked first, then the
//! coupon row, so the overlap count, coupon check, redemption, and inserts
//! for a room happen one request at a time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use staybook_core::config::BookingConfig;
use staybook_core::error::{AppError, ErrorKind};
use staybook_core::result::AppResult;
use staybook_core::types::pagination::{PageRequest, PageResponse};
use staybook_database::DatabasePool;
use staybook_database::repositories::{
    CouponRepository, HotelRepository, PaymentRepository, ReservationRepository, RoomRepository,
};
use staybook_entity::payment::{NewPayment, PaymentRecordStatus};
use staybook_entity::reservation::{NewReservation, Reservation, ReservationStatus};

use crate::booking::{
    StayDates, check_cancellable, check_status_change, evaluate_coupon, initial_state, is_bookable,
    normalize_code, quote,
};
use crate::context::RequestContext;

/// Input for creating a reservation.
///
/// `total_price` and `discount` are what the client displayed. They are
/// compared against the server-side quote and otherwise ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationRequest {
    /// Hotel the room belongs to.
    pub hotel_id: Uuid,
    /// Room type being booked.
    pub room_id: Uuid,
    /// Check-in instant.
    pub check_in: DateTime<Utc>,
    /// Check-out instant.
    pub check_out: DateTime<Utc>,
    /// Number of guests.
    pub guests: i32,
    /// Optional extras (breakfast, parking, ...) in won.
    pub extras_price: Option<i64>,
    /// Coupon code to redeem.
    pub coupon_code: Option<String>,
    /// Free-form requests for the hotel.
    pub special_requests: Option<String>,
    /// Client-computed total.
    pub total_price: Option<i64>,
    /// Client-computed discount.
    pub discount: Option<i64>,
}

/// Creates, cancels, and lists reservations.
#[derive(Debug, Clone)]
pub struct ReservationService {
    db: DatabasePool,
    room_repo: Arc<RoomRepository>,
    hotel_repo: Arc<HotelRepository>,
    reservation_repo: Arc<ReservationRepository>,
    coupon_repo: Arc<CouponRepository>,
    payment_repo: Arc<PaymentRepository>,
    config: BookingConfig,
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(
        db: DatabasePool,
        room_repo: Arc<RoomRepository>,
        hotel_repo: Arc<HotelRepository>,
        reservation_repo: Arc<ReservationRepository>,
        coupon_repo: Arc<CouponRepository>,
        payment_repo: Arc<PaymentRepository>,
        config: BookingConfig,
    ) -> Self {
        Self {
            db,
            room_repo,
            hotel_repo,
            reservation_repo,
            coupon_repo,
            payment_repo,
            config,
        }
    }

    /// Book a room for the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateReservationRequest,
    ) -> AppResult<Reservation> {
        let dates = StayDates::new(req.check_in, req.check_out)?;
        if req.guests < 1 {
            return Err(AppError::validation("투숙 인원은 1명 이상이어야 합니다"));
        }
        let extras = req.extras_price.unwrap_or(0);

        let mut tx = self.db.begin().await?;

        let room = self
            .room_repo
            .lock_for_booking(&mut tx, req.room_id)
            .await?
            .ok_or_else(|| AppError::not_found("객실을 찾을 수 없습니다"))?;

        if room.hotel_id != req.hotel_id {
            return Err(AppError::validation("객실이 해당 호텔에 속하지 않습니다"));
        }
        if !room.is_open() {
            return Err(AppError::no_availability("현재 예약할 수 없는 객실입니다"));
        }
        if req.guests > room.max_guests {
            return Err(AppError::capacity(format!(
                "최대 투숙 인원({}명)을 초과했습니다",
                room.max_guests
            )));
        }

        let price = quote(room.price, &dates, extras)?;
        if price.nights > self.config.max_nights {
            return Err(AppError::validation(format!(
                "최대 {}박까지 예약할 수 있습니다",
                self.config.max_nights
            )));
        }

        let overlap = self
            .reservation_repo
            .count_overlapping(&mut tx, room.id, dates.check_in(), dates.check_out())
            .await?;
        if !is_bookable(overlap, room.total_rooms) {
            info!(
                room_id = %room.id,
                overlap,
                total_rooms = room.total_rooms,
                "Room fully booked for requested dates"
            );
            return Err(AppError::no_availability(
                "선택하신 날짜에 예약 가능한 객실이 없습니다",
            ));
        }

        let coupon_code = normalize_code(req.coupon_code.as_deref());
        let mut discount = 0;
        let mut coupon_id = None;
        if let Some(code) = coupon_code.as_deref() {
            let coupon = self
                .coupon_repo
                .lock_by_code(&mut tx, code)
                .await?
                .ok_or_else(|| AppError::not_found("존재하지 않는 쿠폰입니다"))?;
            let evaluation =
                evaluate_coupon(&coupon, ctx.user_id, Utc::now(), price.total_before_discount)?;
            discount = evaluation.discount;
            coupon_id = Some(coupon.id);
        }

        let total_price = price.total_before_discount - discount;
        if total_price < 0 {
            return Err(AppError::validation(
                "할인 금액이 결제 금액을 초과하여 예약할 수 없습니다",
            ));
        }

        if req.total_price.is_some_and(|t| t != total_price)
            || req.discount.is_some_and(|d| d != discount)
        {
            warn!(
                user_id = %ctx.user_id,
                room_id = %room.id,
                client_total = ?req.total_price,
                client_discount = ?req.discount,
                server_total = total_price,
                server_discount = discount,
                "Client price disagrees with server quote"
            );
        }

        let nights = i32::try_from(price.nights)
            .map_err(|_| AppError::validation("숙박 기간이 너무 깁니다"))?;

        let (status, payment_status) = initial_state(self.config.confirm_on_create);
        let reservation = self
            .reservation_repo
            .insert(
                &mut tx,
                &NewReservation {
                    user_id: ctx.user_id,
                    hotel_id: room.hotel_id,
                    room_id: room.id,
                    check_in: dates.check_in(),
                    check_out: dates.check_out(),
                    guests: req.guests,
                    nights,
                    room_price: price.room_price,
                    extras_price: price.extras_price,
                    discount,
                    total_price,
                    coupon_code: coupon_code.clone(),
                    special_requests: req.special_requests,
                    status,
                    payment_status,
                },
            )
            .await?;

        if let Some(id) = coupon_id {
            if !self.coupon_repo.increment_usage(&mut tx, id).await? {
                return Err(AppError::usage_limit_exceeded("쿠폰 사용 한도를 초과했습니다"));
            }
        }

        if self.config.confirm_on_create {
            self.payment_repo
                .insert(
                    &mut *tx,
                    &NewPayment {
                        user_id: ctx.user_id,
                        reservation_id: reservation.id,
                        order_id: new_order_id(),
                        payment_key: None,
                        amount: price.total_before_discount,
                        discount,
                        final_amount: total_price,
                        method: None,
                        status: PaymentRecordStatus::Paid,
                        paid_at: Some(reservation.created_at),
                    },
                )
                .await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit reservation", e)
        })?;

        info!(
            reservation_id = %reservation.id,
            user_id = %ctx.user_id,
            room_id = %reservation.room_id,
            nights = reservation.nights,
            total_price = reservation.total_price,
            coupon = ?reservation.coupon_code,
            status = %reservation.status,
            "Reservation created"
        );

        Ok(reservation)
    }

    /// Cancel one of the caller's reservations.
    ///
    /// Any payment still pending for the reservation is failed in the same
    /// transaction, so it can no longer be confirmed.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
        reason: Option<String>,
    ) -> AppResult<Reservation> {
        let reservation = self.find(reservation_id).await?;
        let now = Utc::now();
        check_cancellable(&reservation, ctx.user_id, now)?;

        let mut tx = self.db.begin().await?;
        let cancelled = self
            .reservation_repo
            .cancel(&mut *tx, reservation_id, reason.as_deref(), now)
            .await?
            .ok_or_else(|| AppError::already_cancelled("이미 취소된 예약입니다"))?;
        let voided = self
            .payment_repo
            .fail_pending_for_reservation(&mut *tx, reservation_id, "예약이 취소되었습니다")
            .await?;
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit cancellation", e)
        })?;

        info!(
            reservation_id = %reservation_id,
            user_id = %ctx.user_id,
            reason = ?cancelled.cancel_reason,
            voided_payments = voided,
            "Reservation cancelled"
        );

        Ok(cancelled)
    }

    /// Mark a stay completed or a no-show. Only the hotel owner or an admin.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
        next: ReservationStatus,
    ) -> AppResult<Reservation> {
        let reservation = self.find(reservation_id).await?;

        if !ctx.is_admin() {
            let hotel = self
                .hotel_repo
                .find_by_id(reservation.hotel_id)
                .await?
                .ok_or_else(|| AppError::not_found("호텔을 찾을 수 없습니다"))?;
            if !hotel.is_owned_by(ctx.user_id) {
                return Err(AppError::forbidden("해당 호텔의 예약만 변경할 수 있습니다"));
            }
        }

        check_status_change(reservation.status, next)?;

        let updated = self
            .reservation_repo
            .transition(self.db.pool(), reservation_id, reservation.status, next)
            .await?
            .ok_or_else(|| AppError::invalid_state("예약 상태가 이미 변경되었습니다"))?;

        info!(
            reservation_id = %reservation_id,
            from = %reservation.status,
            to = %next,
            actor = %ctx.user_id,
            "Reservation status changed"
        );

        Ok(updated)
    }

    /// One reservation, visible to its owner or an admin.
    pub async fn get(&self, ctx: &RequestContext, reservation_id: Uuid) -> AppResult<Reservation> {
        let reservation = self.find(reservation_id).await?;
        if !ctx.owns_or_admin(reservation.user_id) {
            return Err(AppError::forbidden("본인의 예약만 조회할 수 있습니다"));
        }
        Ok(reservation)
    }

    /// The caller's reservations, newest first.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.reservation_repo.find_by_user(ctx.user_id, page).await
    }

    async fn find(&self, reservation_id: Uuid) -> AppResult<Reservation> {
        self.reservation_repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("예약을 찾을 수 없습니다"))
    }
}

/// Fresh merchant order id for a payment record.
pub(crate) fn new_order_id() -> String {
    format!("SB-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_ids_are_unique() {
        let a = new_order_id();
        let b = new_order_id();
        assert!(a.starts_with("SB-"));
        assert_eq!(a.len(), 3 + 32);
        assert_ne!(a, b);
    }
}
