//! Coupon redemption integration tests.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use staybook_entity::user::UserRole;
use uuid::Uuid;

use crate::helpers::{TestApp, TestCoupon, TestResponse, stay};

struct Fixture {
    app: TestApp,
    hotel: Uuid,
    room: Uuid,
}

impl Fixture {
    /// A room at 100,000 per night with plenty of units.
    async fn new() -> Self {
        let app = TestApp::new().await;
        let hotel = app.create_hotel(None).await;
        let room = app.create_room(hotel, 100_000, 10, 2).await;
        Self { app, hotel, room }
    }

    /// Books two nights with `code`.
    async fn book(&self, token: &str, code: &str, offset_days: i64) -> TestResponse {
        let (check_in, check_out) = stay(offset_days, 2);
        self.app
            .request(
                "POST",
                "/api/reservations",
                Some(json!({
                    "hotelId": self.hotel,
                    "roomId": self.room,
                    "checkIn": check_in,
                    "checkOut": check_out,
                    "guests": 1,
                    "couponCode": code,
                })),
                Some(token),
            )
            .await
    }

    async fn used_count(&self, code: &str) -> i32 {
        sqlx::query_scalar("SELECT used_count FROM coupons WHERE code = $1")
            .bind(code)
            .fetch_one(&self.app.db_pool)
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_percent_coupon_is_capped_and_redeemed() {
    let fx = Fixture::new().await;
    let (_, token) = fx.app.create_user(UserRole::User).await;
    let code = fx
        .app
        .create_coupon(TestCoupon::percent(10, Some(15_000)))
        .await;

    let res = fx.book(&token, &code.to_lowercase(), 10).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.data()["discount"], 15_000);
    assert_eq!(res.data()["totalPrice"], 185_000);
    assert_eq!(res.data()["couponCode"], code.as_str());
    assert_eq!(fx.used_count(&code).await, 1);
}

#[tokio::test]
async fn test_apply_preview_does_not_redeem() {
    let fx = Fixture::new().await;
    let (_, token) = fx.app.create_user(UserRole::User).await;
    let code = fx.app.create_coupon(TestCoupon::amount(5_000)).await;

    let res = fx
        .app
        .request(
            "POST",
            "/api/coupons/apply",
            Some(json!({ "code": code, "amount": 50_000 })),
            Some(&token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["discount"], 5_000);
    assert_eq!(res.data()["finalAmount"], 45_000);
    assert_eq!(fx.used_count(&code).await, 0);
}

#[tokio::test]
async fn test_usage_limit_exceeded() {
    let fx = Fixture::new().await;
    let (_, first) = fx.app.create_user(UserRole::User).await;
    let (_, second) = fx.app.create_user(UserRole::User).await;
    let code = fx
        .app
        .create_coupon(TestCoupon {
            usage_limit: Some(1),
            ..TestCoupon::amount(10_000)
        })
        .await;

    let res = fx.book(&first, &code, 10).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);

    let res = fx.book(&second, &code, 20).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "USAGE_LIMIT_EXCEEDED");
    assert_eq!(fx.used_count(&code).await, 1);
}

#[tokio::test]
async fn test_expired_coupon() {
    let fx = Fixture::new().await;
    let (_, token) = fx.app.create_user(UserRole::User).await;
    let now = Utc::now();
    let code = fx
        .app
        .create_coupon(TestCoupon {
            valid_from: now - Duration::days(30),
            valid_until: now - Duration::days(1),
            ..TestCoupon::amount(10_000)
        })
        .await;

    let res = fx.book(&token, &code, 10).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "EXPIRED");
}

#[tokio::test]
async fn test_min_amount_not_met() {
    let fx = Fixture::new().await;
    let (_, token) = fx.app.create_user(UserRole::User).await;
    let code = fx
        .app
        .create_coupon(TestCoupon {
            min_amount: 300_000,
            ..TestCoupon::amount(10_000)
        })
        .await;

    let res = fx.book(&token, &code, 10).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "MIN_AMOUNT");
    assert_eq!(fx.used_count(&code).await, 0);
}

#[tokio::test]
async fn test_unknown_coupon_leaves_no_reservation() {
    let fx = Fixture::new().await;
    let (user_id, token) = fx.app.create_user(UserRole::User).await;

    let res = fx.book(&token, "NOSUCHCOUPON", 10).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error_code(), "NOT_FOUND");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&fx.app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_flat_discount_larger_than_total_rolls_back() {
    let fx = Fixture::new().await;
    let (_, token) = fx.app.create_user(UserRole::User).await;
    let code = fx.app.create_coupon(TestCoupon::amount(500_000)).await;

    let res = fx.book(&token, &code, 10).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION");
    assert_eq!(fx.used_count(&code).await, 0);
}
