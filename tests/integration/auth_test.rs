//! Authentication integration tests.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

const PASSWORD: &str = "Sb!9vQz#2LmP";

fn unique_email() -> String {
    format!("Guest.{}@StayBook.test", Uuid::new_v4().simple())
}

#[tokio::test]
async fn test_register_login_and_profile() {
    let app = TestApp::new().await;
    let email = unique_email();

    let res = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": email, "password": PASSWORD, "name": "김스테이" })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.data()["user"]["email"], email.to_lowercase().as_str());
    assert_eq!(res.data()["user"]["role"], "user");
    assert!(res.data()["user"].get("passwordHash").is_none());
    assert!(res.data()["accessToken"].is_string());

    let res = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": email, "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    let token = res.data()["accessToken"].as_str().unwrap().to_string();
    let refresh = res.data()["refreshToken"].as_str().unwrap().to_string();

    let res = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["name"], "김스테이");

    let res = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": refresh })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert!(res.data()["accessToken"].is_string());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    let email = unique_email();
    let body = json!({ "email": email, "password": PASSWORD, "name": "중복" });

    let res = app
        .request("POST", "/api/auth/register", Some(body.clone()), None)
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);

    let res = app.request("POST", "/api/auth/register", Some(body), None).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_wrong_password_unauthorized() {
    let app = TestApp::new().await;
    let email = unique_email();
    app.request(
        "POST",
        "/api/auth/register",
        Some(json!({ "email": email, "password": PASSWORD, "name": "로그인" })),
        None,
    )
    .await;

    let res = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": email, "password": "Wrong!pass123" })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error_code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_weak_password_rejected() {
    let app = TestApp::new().await;
    let res = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": unique_email(), "password": "password", "name": "약함" })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION");
}
