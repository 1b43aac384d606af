//! Reservation state rules.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use staybook_core::error::AppError;
use staybook_core::result::AppResult;
use staybook_entity::reservation::{PaymentStatus, Reservation, ReservationStatus};

/// Status pair a new reservation starts in.
///
/// With `confirm_on_create` the reservation is booked and paid at once;
/// otherwise it waits for the payment intent and gateway confirmation.
pub fn initial_state(confirm_on_create: bool) -> (ReservationStatus, PaymentStatus) {
    if confirm_on_create {
        (ReservationStatus::Confirmed, PaymentStatus::Paid)
    } else {
        (ReservationStatus::Pending, PaymentStatus::Pending)
    }
}

/// Check that `requester` may cancel `reservation` at `now`.
///
/// Order: ownership, already cancelled, check-in passed.
pub fn check_cancellable(
    reservation: &Reservation,
    requester: Uuid,
    now: DateTime<Utc>,
) -> AppResult<()> {
    if !reservation.is_owned_by(requester) {
        return Err(AppError::forbidden("본인의 예약만 취소할 수 있습니다"));
    }
    if reservation.status == ReservationStatus::Cancelled {
        return Err(AppError::already_cancelled("이미 취소된 예약입니다"));
    }
    if now > reservation.check_in {
        return Err(AppError::past_check_in(
            "체크인 날짜가 지난 예약은 취소할 수 없습니다",
        ));
    }
    Ok(())
}

/// Check a hotel-side status change (`completed` or `no-show`).
pub fn check_status_change(current: ReservationStatus, next: ReservationStatus) -> AppResult<()> {
    if !matches!(next, ReservationStatus::Completed | ReservationStatus::NoShow) {
        return Err(AppError::validation(
            "변경할 수 있는 상태는 completed 또는 no-show 입니다",
        ));
    }
    if !current.can_transition_to(next) {
        return Err(AppError::invalid_state(format!(
            "'{current}' 상태의 예약은 '{next}' 상태로 변경할 수 없습니다"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use staybook_core::ErrorKind;

    fn reservation(owner: Uuid, status: ReservationStatus, check_in: DateTime<Utc>) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            user_id: owner,
            hotel_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            check_in,
            check_out: check_in + Duration::days(2),
            guests: 2,
            nights: 2,
            room_price: 100_000,
            extras_price: 0,
            discount: 0,
            total_price: 200_000,
            coupon_code: None,
            special_requests: None,
            status,
            payment_status: PaymentStatus::Paid,
            cancel_reason: None,
            cancelled_at: None,
            created_at: check_in - Duration::days(10),
            updated_at: check_in - Duration::days(10),
        }
    }

    fn june(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(
            initial_state(true),
            (ReservationStatus::Confirmed, PaymentStatus::Paid)
        );
        assert_eq!(
            initial_state(false),
            (ReservationStatus::Pending, PaymentStatus::Pending)
        );
    }

    #[test]
    fn test_owner_can_cancel_before_check_in() {
        let owner = Uuid::new_v4();
        let r = reservation(owner, ReservationStatus::Confirmed, june(10));
        assert!(check_cancellable(&r, owner, june(9)).is_ok());
    }

    #[test]
    fn test_other_user_forbidden_first() {
        let r = reservation(Uuid::new_v4(), ReservationStatus::Cancelled, june(1));
        let err = check_cancellable(&r, Uuid::new_v4(), june(9)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_already_cancelled_before_past_check_in() {
        let owner = Uuid::new_v4();
        let r = reservation(owner, ReservationStatus::Cancelled, june(1));
        let err = check_cancellable(&r, owner, june(9)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyCancelled);
    }

    #[test]
    fn test_past_check_in() {
        let owner = Uuid::new_v4();
        let r = reservation(owner, ReservationStatus::Confirmed, june(1));
        let err = check_cancellable(&r, owner, june(2)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::PastCheckIn);
    }

    #[test]
    fn test_status_change_rules() {
        use ReservationStatus::*;
        assert!(check_status_change(Confirmed, Completed).is_ok());
        assert!(check_status_change(Confirmed, NoShow).is_ok());
        assert_eq!(
            check_status_change(Cancelled, Completed).unwrap_err().kind,
            ErrorKind::InvalidState
        );
        assert_eq!(
            check_status_change(Confirmed, Cancelled).unwrap_err().kind,
            ErrorKind::Validation
        );
    }
}
