//! Stay pricing in whole won.

use chrono::{DateTime, Utc};
use serde::Serialize;

use staybook_core::error::AppError;
use staybook_core::result::AppResult;

use super::overlap::StayDates;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Itemized price of a stay before any coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Billable nights.
    pub nights: i64,
    /// Nightly room price.
    pub room_price: i64,
    /// `room_price * nights`.
    pub subtotal: i64,
    /// Extra charges.
    pub extras_price: i64,
    /// `subtotal + extras_price`.
    pub total_before_discount: i64,
}

/// Nights between two instants, rounded up, never less than one.
pub fn count_nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let millis = (check_out - check_in).num_milliseconds();
    let nights = millis.div_euclid(MILLIS_PER_DAY)
        + i64::from(millis.rem_euclid(MILLIS_PER_DAY) != 0);
    nights.max(1)
}

/// Price a stay.
pub fn quote(room_price: i64, stay: &StayDates, extras_price: i64) -> AppResult<PriceQuote> {
    if room_price < 0 {
        return Err(AppError::validation("객실 가격이 올바르지 않습니다"));
    }
    if extras_price < 0 {
        return Err(AppError::validation("추가 요금은 0원 이상이어야 합니다"));
    }

    let nights = count_nights(stay.check_in(), stay.check_out());
    let subtotal = room_price
        .checked_mul(nights)
        .ok_or_else(|| AppError::validation("예약 금액이 너무 큽니다"))?;
    let total_before_discount = subtotal
        .checked_add(extras_price)
        .ok_or_else(|| AppError::validation("예약 금액이 너무 큽니다"))?;

    Ok(PriceQuote {
        nights,
        room_price,
        subtotal,
        extras_price,
        total_before_discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_whole_days() {
        assert_eq!(count_nights(at(1, 0), at(3, 0)), 2);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        assert_eq!(count_nights(at(1, 15), at(3, 11)), 2);
        assert_eq!(count_nights(at(1, 15), at(3, 16)), 3);
    }

    #[test]
    fn test_minimum_one_night() {
        let start = at(1, 15);
        assert_eq!(count_nights(start, start + Duration::hours(3)), 1);
    }

    #[test]
    fn test_two_night_quote() {
        let stay = StayDates::new(at(1, 0), at(3, 0)).unwrap();
        let q = quote(100_000, &stay, 0).unwrap();
        assert_eq!(q.nights, 2);
        assert_eq!(q.subtotal, 200_000);
        assert_eq!(q.total_before_discount, 200_000);
    }

    #[test]
    fn test_extras_added_after_subtotal() {
        let stay = StayDates::new(at(1, 0), at(4, 0)).unwrap();
        let q = quote(80_000, &stay, 30_000).unwrap();
        assert_eq!(q.subtotal, 240_000);
        assert_eq!(q.total_before_discount, 270_000);
    }

    #[test]
    fn test_deterministic() {
        let stay = StayDates::new(at(1, 14), at(5, 10)).unwrap();
        assert_eq!(quote(123_456, &stay, 7).unwrap(), quote(123_456, &stay, 7).unwrap());
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let stay = StayDates::new(at(1, 0), at(2, 0)).unwrap();
        assert!(quote(100, &stay, -1).is_err());
        assert!(quote(-100, &stay, 0).is_err());
    }
}
