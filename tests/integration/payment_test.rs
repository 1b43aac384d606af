//! Payment flow integration tests against an in-memory gateway.

use axum::http::StatusCode;
use serde_json::{Value, json};
use staybook_entity::user::UserRole;
use staybook_service::payment::GatewayStatus;
use uuid::Uuid;

use crate::helpers::{TestApp, stay};

/// A pending reservation of 2 nights at 100,000 and its payment intent.
struct PendingPayment {
    app: TestApp,
    token: String,
    reservation_id: String,
    payment: Value,
}

impl PendingPayment {
    async fn new() -> Self {
        let app = TestApp::with_config(|c| c.booking.confirm_on_create = false).await;
        let (_, token) = app.create_user(UserRole::User).await;
        let hotel = app.create_hotel(None).await;
        let room = app.create_room(hotel, 100_000, 5, 2).await;
        let (check_in, check_out) = stay(15, 2);

        let res = app
            .request(
                "POST",
                "/api/reservations",
                Some(json!({
                    "hotelId": hotel,
                    "roomId": room,
                    "checkIn": check_in,
                    "checkOut": check_out,
                    "guests": 2,
                })),
                Some(&token),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        assert_eq!(res.data()["status"], "pending");
        assert_eq!(res.data()["paymentStatus"], "pending");
        let reservation_id = res.data()["id"].as_str().unwrap().to_string();

        let res = app
            .request(
                "POST",
                "/api/payments",
                Some(json!({ "reservationId": reservation_id })),
                Some(&token),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        assert_eq!(res.data()["status"], "pending");
        assert_eq!(res.data()["finalAmount"], 200_000);
        let payment = res.data().clone();

        Self {
            app,
            token,
            reservation_id,
            payment,
        }
    }

    fn order_id(&self) -> &str {
        self.payment["orderId"].as_str().unwrap()
    }

    fn payment_id(&self) -> &str {
        self.payment["id"].as_str().unwrap()
    }

    async fn confirm(&self, payment_key: &str, amount: i64) -> crate::helpers::TestResponse {
        self.app
            .request(
                "POST",
                "/api/payments/confirm",
                Some(json!({
                    "paymentKey": payment_key,
                    "orderId": self.order_id(),
                    "amount": amount,
                })),
                Some(&self.token),
            )
            .await
    }

    async fn reservation(&self) -> Value {
        let res = self
            .app
            .request(
                "GET",
                &format!("/api/reservations/{}", self.reservation_id),
                None,
                Some(&self.token),
            )
            .await;
        res.data().clone()
    }

    async fn payment_status(&self) -> String {
        let id: Uuid = self.payment_id().parse().unwrap();
        sqlx::query_scalar("SELECT status::text FROM payments WHERE id = $1")
            .bind(id)
            .fetch_one(&self.app.db_pool)
            .await
            .unwrap()
    }
}

fn payment_key() -> String {
    format!("pk_{}", Uuid::new_v4().simple())
}

#[tokio::test]
async fn test_confirm_marks_reservation_paid() {
    let p = PendingPayment::new().await;

    let res = p.confirm(&payment_key(), 200_000).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["status"], "paid");
    assert!(res.data()["paidAt"].is_string());

    let reservation = p.reservation().await;
    assert_eq!(reservation["status"], "confirmed");
    assert_eq!(reservation["paymentStatus"], "paid");
}

#[tokio::test]
async fn test_confirm_amount_mismatch_keeps_pending() {
    let p = PendingPayment::new().await;

    let res = p.confirm(&payment_key(), 150_000).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION");
    assert_eq!(p.payment_status().await, "pending");
}

#[tokio::test]
async fn test_gateway_failure_marks_payment_failed() {
    let p = PendingPayment::new().await;
    let key = payment_key();
    p.app.gateway.decline(&key);

    let res = p.confirm(&key, 200_000).await;
    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    assert_eq!(res.error_code(), "GATEWAY");
    assert_eq!(p.payment_status().await, "failed");
    assert_eq!(p.reservation().await["paymentStatus"], "failed");
}

#[tokio::test]
async fn test_confirm_after_reservation_cancel_rejected() {
    let p = PendingPayment::new().await;

    let res = p
        .app
        .request(
            "PATCH",
            &format!("/api/reservations/{}/cancel", p.reservation_id),
            Some(json!({ "reason": "일정 변경" })),
            Some(&p.token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(p.payment_status().await, "failed");

    let res = p.confirm(&payment_key(), 200_000).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "INVALID_STATE");
    assert_eq!(p.payment_status().await, "failed");

    let reservation = p.reservation().await;
    assert_eq!(reservation["status"], "cancelled");
    assert_ne!(reservation["paymentStatus"], "paid");
}

#[tokio::test]
async fn test_second_intent_reuses_open_payment() {
    let p = PendingPayment::new().await;

    let res = p
        .app
        .request(
            "POST",
            "/api/payments",
            Some(json!({ "reservationId": p.reservation_id })),
            Some(&p.token),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.data()["id"], p.payment["id"]);
    assert_eq!(res.data()["orderId"], p.payment["orderId"]);

    let reservation_id: Uuid = p.reservation_id.parse().unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE reservation_id = $1")
        .bind(reservation_id)
        .fetch_one(&p.app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let res = p.confirm(&payment_key(), 200_000).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    let res = p.confirm(&payment_key(), 200_000).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let paid: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM payments WHERE reservation_id = $1 AND status = 'paid'",
    )
    .bind(reservation_id)
    .fetch_one(&p.app.db_pool)
    .await
    .unwrap();
    assert_eq!(paid, 1);
}

#[tokio::test]
async fn test_partial_refund() {
    let p = PendingPayment::new().await;
    let res = p.confirm(&payment_key(), 200_000).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);

    let res = p
        .app
        .request(
            "POST",
            &format!("/api/payments/{}/refund", p.payment_id()),
            Some(json!({ "amount": 50_000, "reason": "부분 환불" })),
            Some(&p.token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["status"], "refunded");
    assert_eq!(res.data()["refund"]["amount"], 50_000);
    assert_eq!(p.reservation().await["paymentStatus"], "refunded");
}

#[tokio::test]
async fn test_refund_more_than_paid_rejected() {
    let p = PendingPayment::new().await;
    p.confirm(&payment_key(), 200_000).await;

    let res = p
        .app
        .request(
            "POST",
            &format!("/api/payments/{}/refund", p.payment_id()),
            Some(json!({ "amount": 250_000 })),
            Some(&p.token),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION");
    assert_eq!(p.payment_status().await, "paid");
}

#[tokio::test]
async fn test_webhook_applies_gateway_state() {
    let p = PendingPayment::new().await;
    let key = payment_key();
    p.app
        .gateway
        .set_remote(&key, p.order_id(), GatewayStatus::Done, 200_000);

    let body = json!({
        "eventType": "PAYMENT_STATUS_CHANGED",
        "data": { "paymentKey": key, "orderId": p.order_id() },
    });
    let res = p
        .app
        .request("POST", "/api/payments/webhook", Some(body.clone()), None)
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["status"], "paid");

    // Redelivery is a no-op.
    let res = p
        .app
        .request("POST", "/api/payments/webhook", Some(body), None)
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["status"], "paid");
    assert_eq!(p.reservation().await["status"], "confirmed");
}

#[tokio::test]
async fn test_webhook_order_mismatch_rejected() {
    let p = PendingPayment::new().await;
    let key = payment_key();
    p.app
        .gateway
        .set_remote(&key, "some-other-order", GatewayStatus::Done, 200_000);

    let res = p
        .app
        .request(
            "POST",
            "/api/payments/webhook",
            Some(json!({ "data": { "paymentKey": key, "orderId": p.order_id() } })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(p.payment_status().await, "pending");
}

#[tokio::test]
async fn test_webhook_captured_amount_mismatch_fails_payment() {
    let p = PendingPayment::new().await;
    let key = payment_key();
    p.app
        .gateway
        .set_remote(&key, p.order_id(), GatewayStatus::Done, 1_000);

    let res = p
        .app
        .request(
            "POST",
            "/api/payments/webhook",
            Some(json!({ "data": { "paymentKey": key, "orderId": p.order_id() } })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION");
    assert_eq!(p.payment_status().await, "failed");

    let reservation = p.reservation().await;
    assert_eq!(reservation["status"], "pending");
    assert_ne!(reservation["paymentStatus"], "paid");
}
