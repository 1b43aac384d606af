//! Reservation overlap predicate.
//!
//! Two stays overlap when `existing.check_in <= requested.check_out` and
//! `existing.check_out >= requested.check_in`. Both ends are inclusive, so a
//! stay that starts on the day another ends still counts as overlapping.
//! The SQL in the reservation and room repositories mirrors this predicate.

use chrono::{DateTime, Utc};

use staybook_core::error::AppError;
use staybook_core::result::AppResult;

/// A validated stay: `check_in` is strictly before `check_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

impl StayDates {
    /// Validate and build a stay.
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> AppResult<Self> {
        if check_in >= check_out {
            return Err(AppError::validation(
                "체크아웃 날짜는 체크인 날짜보다 이후여야 합니다",
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Start of the stay.
    pub fn check_in(&self) -> DateTime<Utc> {
        self.check_in
    }

    /// End of the stay.
    pub fn check_out(&self) -> DateTime<Utc> {
        self.check_out
    }

    /// Whether this stay overlaps `other` (inclusive boundaries).
    pub fn overlaps(&self, other: &StayDates) -> bool {
        overlaps(other.check_in, other.check_out, self.check_in, self.check_out)
    }
}

/// Inclusive overlap test between an existing stay and a requested one.
pub fn overlaps(
    existing_check_in: DateTime<Utc>,
    existing_check_out: DateTime<Utc>,
    requested_check_in: DateTime<Utc>,
    requested_check_out: DateTime<Utc>,
) -> bool {
    existing_check_in <= requested_check_out && existing_check_out >= requested_check_in
}

/// A room type is bookable while the overlapping reservations leave at
/// least one unit free.
pub fn is_bookable(overlap_count: i64, total_rooms: i32) -> bool {
    overlap_count < i64::from(total_rooms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use staybook_core::ErrorKind;

    fn day(month: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_inverted_or_empty_range() {
        let err = StayDates::new(day(6, 3), day(6, 1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(StayDates::new(day(6, 3), day(6, 3)).is_err());
        assert!(StayDates::new(day(6, 1), day(6, 3)).is_ok());
    }

    #[test]
    fn test_partial_overlap() {
        let a = StayDates::new(day(6, 1), day(6, 3)).unwrap();
        let b = StayDates::new(day(6, 2), day(6, 4)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_boundaries_overlap() {
        let a = StayDates::new(day(6, 1), day(6, 3)).unwrap();
        let b = StayDates::new(day(6, 3), day(6, 5)).unwrap();
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_disjoint_stays() {
        let a = StayDates::new(day(6, 1), day(6, 3)).unwrap();
        let b = StayDates::new(day(6, 4), day(6, 6)).unwrap();
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_inventory_threshold() {
        // With N units, N overlapping stays fit and the N+1th does not.
        let total_rooms = 3;
        for booked in 0..3 {
            assert!(is_bookable(booked, total_rooms));
        }
        assert!(!is_bookable(3, total_rooms));
        assert!(!is_bookable(1, 1));
    }

    #[test]
    fn test_single_room_scenario() {
        // A [06-01, 06-03) confirmed on a one-room type; B [06-02, 06-04) must be refused.
        let a = StayDates::new(day(6, 1), day(6, 3)).unwrap();
        let b = StayDates::new(day(6, 2), day(6, 4)).unwrap();
        let overlapping = [a].iter().filter(|s| s.overlaps(&b)).count() as i64;
        assert!(!is_bookable(overlapping, 1));
    }
}
