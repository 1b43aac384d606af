//! Reservation lifecycle integration tests.

use axum::http::StatusCode;
use serde_json::json;
use staybook_entity::user::UserRole;
use uuid::Uuid;

use crate::helpers::{TestApp, send, stay};

async fn book(
    app: &TestApp,
    token: &str,
    hotel_id: Uuid,
    room_id: Uuid,
    dates: &(String, String),
    guests: i32,
) -> crate::helpers::TestResponse {
    app.request(
        "POST",
        "/api/reservations",
        Some(json!({
            "hotelId": hotel_id,
            "roomId": room_id,
            "checkIn": dates.0,
            "checkOut": dates.1,
            "guests": guests,
        })),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn test_create_and_get_reservation() {
    let app = TestApp::new().await;
    let (_, token) = app.create_user(UserRole::User).await;
    let hotel = app.create_hotel(None).await;
    let room = app.create_room(hotel, 100_000, 3, 2).await;

    let res = book(&app, &token, hotel, room, &stay(10, 2), 2).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["resultCode"], "SUCCESS");
    assert_eq!(res.data()["nights"], 2);
    assert_eq!(res.data()["totalPrice"], 200_000);
    assert_eq!(res.data()["status"], "confirmed");
    assert_eq!(res.data()["paymentStatus"], "paid");

    let id = res.data()["id"].as_str().unwrap().to_string();
    let res = app
        .request("GET", &format!("/api/reservations/{id}"), None, Some(&token))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["id"], id.as_str());

    let (_, stranger) = app.create_user(UserRole::User).await;
    let res = app
        .request("GET", &format!("/api/reservations/{id}"), None, Some(&stranger))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_last_unit_conflicts_with_touching_stays() {
    let app = TestApp::new().await;
    let (_, token) = app.create_user(UserRole::User).await;
    let hotel = app.create_hotel(None).await;
    let room = app.create_room(hotel, 80_000, 1, 2).await;

    let first = stay(20, 2);
    let res = book(&app, &token, hotel, room, &first, 1).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);

    let overlapping = stay(21, 2);
    let res = book(&app, &token, hotel, room, &overlapping, 1).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "NO_AVAILABILITY");

    // Boundaries are inclusive: checking in on the previous check-out day conflicts.
    let back_to_back = stay(22, 1);
    let res = book(&app, &token, hotel, room, &back_to_back, 1).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "NO_AVAILABILITY");

    let after_gap = stay(23, 1);
    let res = book(&app, &token, hotel, room, &after_gap, 1).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
}

#[tokio::test]
async fn test_guests_over_capacity() {
    let app = TestApp::new().await;
    let (_, token) = app.create_user(UserRole::User).await;
    let hotel = app.create_hotel(None).await;
    let room = app.create_room(hotel, 50_000, 2, 2).await;

    let res = book(&app, &token, hotel, room, &stay(5, 1), 3).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "CAPACITY");
}

#[tokio::test]
async fn test_cancel_frees_inventory() {
    let app = TestApp::new().await;
    let (_, token) = app.create_user(UserRole::User).await;
    let hotel = app.create_hotel(None).await;
    let room = app.create_room(hotel, 70_000, 1, 2).await;
    let dates = stay(30, 3);

    let res = book(&app, &token, hotel, room, &dates, 2).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    let id = res.data()["id"].as_str().unwrap().to_string();

    let path = format!("/api/reservations/{id}/cancel");
    let res = app
        .request("PATCH", &path, Some(json!({ "reason": "일정 변경" })), Some(&token))
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["status"], "cancelled");
    assert_eq!(res.data()["cancelReason"], "일정 변경");

    let res = app.request("PATCH", &path, None, Some(&token)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "ALREADY_CANCELLED");

    let res = book(&app, &token, hotel, room, &dates, 2).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
}

#[tokio::test]
async fn test_cancel_after_check_in_rejected() {
    let app = TestApp::new().await;
    let (_, token) = app.create_user(UserRole::User).await;
    let hotel = app.create_hotel(None).await;
    let room = app.create_room(hotel, 70_000, 2, 2).await;

    let res = book(&app, &token, hotel, room, &stay(3, 2), 1).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    let id: Uuid = res.data()["id"].as_str().unwrap().parse().unwrap();

    sqlx::query(
        "UPDATE reservations
         SET check_in = NOW() - INTERVAL '1 day', check_out = NOW() + INTERVAL '1 day'
         WHERE id = $1",
    )
    .bind(id)
    .execute(&app.db_pool)
    .await
    .unwrap();

    let res = app
        .request("PATCH", &format!("/api/reservations/{id}/cancel"), None, Some(&token))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "PAST_CHECK_IN");
}

#[tokio::test]
async fn test_concurrent_bookings_never_oversell() {
    let app = TestApp::new().await;
    let hotel = app.create_hotel(None).await;
    let room = app.create_room(hotel, 120_000, 1, 2).await;
    let (check_in, check_out) = stay(40, 2);

    let mut tasks = Vec::new();
    for _ in 0..5 {
        let (_, token) = app.create_user(UserRole::User).await;
        let router = app.router.clone();
        let body = json!({
            "hotelId": hotel,
            "roomId": room,
            "checkIn": check_in,
            "checkOut": check_out,
            "guests": 1,
        });
        tasks.push(tokio::spawn(async move {
            send(router, "POST", "/api/reservations", Some(body), Some(&token)).await
        }));
    }

    let mut created = 0;
    for task in tasks {
        let res = task.await.unwrap();
        match res.status {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => assert_eq!(res.error_code(), "NO_AVAILABILITY"),
            other => panic!("unexpected status {other}: {}", res.body),
        }
    }
    assert_eq!(created, 1);

    let held: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservations WHERE room_id = $1 AND status IN ('pending', 'confirmed')",
    )
    .bind(room)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(held, 1);
}

#[tokio::test]
async fn test_list_my_reservations_is_scoped() {
    let app = TestApp::new().await;
    let (_, token) = app.create_user(UserRole::User).await;
    let (_, other) = app.create_user(UserRole::User).await;
    let hotel = app.create_hotel(None).await;
    let room = app.create_room(hotel, 60_000, 5, 2).await;

    book(&app, &token, hotel, room, &stay(50, 1), 1).await;
    book(&app, &token, hotel, room, &stay(52, 1), 1).await;
    book(&app, &other, hotel, room, &stay(54, 1), 1).await;

    let res = app
        .request("GET", "/api/reservations/my?page=1&limit=10", None, Some(&token))
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["items"].as_array().unwrap().len(), 2);
}
