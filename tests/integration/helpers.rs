//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use staybook_auth::{JwtEncoder, PasswordHasher};
use staybook_core::config::AppConfig;
use staybook_core::error::AppError;
use staybook_database::DatabasePool;
use staybook_entity::coupon::DiscountType;
use staybook_entity::user::UserRole;
use staybook_service::payment::{GatewayPayment, GatewayStatus, PaymentGateway};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    /// Gateway double shared with the payment service
    pub gateway: Arc<MockGateway>,
}

impl TestApp {
    /// Create a new test application with the default configuration.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.database.url = std::env::var("STAYBOOK_TEST_DATABASE_URL")
            .expect("STAYBOOK_TEST_DATABASE_URL must be set for integration tests");
        config.database.min_connections = 0;
        adjust(&mut config);

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        staybook_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let gateway = Arc::new(MockGateway::default());
        let state = staybook_api::build_state_with_gateway(
            config.clone(),
            db.clone(),
            Arc::clone(&gateway) as Arc<dyn PaymentGateway>,
        )
        .expect("Failed to build state");

        Self {
            router: staybook_api::build_app(state),
            db_pool: db.into_pool(),
            config,
            gateway,
        }
    }

    /// Insert a user directly and return their ID and an access token.
    pub async fn create_user(&self, role: UserRole) -> (Uuid, String) {
        let id = Uuid::new_v4();
        let email = format!("{id}@staybook.test");
        let hash = PasswordHasher::new()
            .hash_password("Sb!9vQz#2LmP")
            .expect("Failed to hash password");

        sqlx::query(
            "INSERT INTO users (id, email, password_hash, name, role) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&email)
        .bind(&hash)
        .bind("테스트")
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");

        let token = JwtEncoder::new(&self.config.auth)
            .generate_token_pair(id, &email, role)
            .expect("Failed to sign token")
            .access_token;
        (id, token)
    }

    /// Insert a hotel owned by `owner` and return its ID.
    pub async fn create_hotel(&self, owner: Option<Uuid>) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO hotels (owner_id, name, address, city) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(owner)
        .bind("스테이북 호텔")
        .bind("서울특별시 중구 1")
        .bind("서울")
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create hotel")
    }

    /// Insert a room type and return its ID.
    pub async fn create_room(
        &self,
        hotel_id: Uuid,
        price: i64,
        total_rooms: i32,
        max_guests: i32,
    ) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO rooms (hotel_id, name, price, total_rooms, max_guests)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(hotel_id)
        .bind("디럭스 더블")
        .bind(price)
        .bind(total_rooms)
        .bind(max_guests)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create room")
    }

    /// Insert a public coupon and return its code.
    pub async fn create_coupon(&self, coupon: TestCoupon) -> String {
        let code = format!("IT{}", &Uuid::new_v4().simple().to_string()[..10]).to_uppercase();
        sqlx::query(
            "INSERT INTO coupons
                (code, name, discount_type, discount_value, min_amount, max_discount,
                 valid_from, valid_until, usage_limit)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&code)
        .bind("테스트 쿠폰")
        .bind(coupon.discount_type)
        .bind(coupon.discount_value)
        .bind(coupon.min_amount)
        .bind(coupon.max_discount)
        .bind(coupon.valid_from)
        .bind(coupon.valid_until)
        .bind(coupon.usage_limit)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create coupon");
        code
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        send(self.router.clone(), method, path, body, token).await
    }
}

/// Sends one request through `router`.
pub async fn send(
    router: Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut req = Request::builder().method(method).uri(path);
    if body.is_some() {
        req = req.header(header::CONTENT_TYPE, "application/json");
    }
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = req
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .expect("Failed to build request");

    let response = router.oneshot(req).await.expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse { status, body }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of the envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `errorCode` member of a FAIL envelope.
    pub fn error_code(&self) -> &str {
        self.body["errorCode"].as_str().unwrap_or_default()
    }
}

/// Coupon fixture.
pub struct TestCoupon {
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_amount: i64,
    pub max_discount: Option<i64>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub usage_limit: Option<i32>,
}

impl TestCoupon {
    pub fn percent(value: i64, max_discount: Option<i64>) -> Self {
        Self {
            discount_type: DiscountType::Percent,
            discount_value: value,
            ..Self::amount(0)
        }
        .with_max(max_discount)
    }

    pub fn amount(value: i64) -> Self {
        let now = Utc::now();
        Self {
            discount_type: DiscountType::Amount,
            discount_value: value,
            min_amount: 0,
            max_discount: None,
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(30),
            usage_limit: None,
        }
    }

    fn with_max(mut self, max_discount: Option<i64>) -> Self {
        self.max_discount = max_discount;
        self
    }
}

/// A stay starting `offset_days` from today.
pub fn stay(offset_days: i64, nights: i64) -> (String, String) {
    let check_in = (Utc::now() + Duration::days(offset_days)).date_naive();
    let check_out = check_in + Duration::days(nights);
    (check_in.to_string(), check_out.to_string())
}

/// In-memory [`PaymentGateway`] double.
#[derive(Default)]
pub struct MockGateway {
    /// Payments keyed by payment key, as the gateway would report them.
    payments: Mutex<HashMap<String, GatewayPayment>>,
    /// Payment keys whose confirmation must fail.
    declined: Mutex<Vec<String>>,
}

impl MockGateway {
    /// Make the next confirmation of `payment_key` fail.
    pub fn decline(&self, payment_key: &str) {
        self.declined
            .lock()
            .expect("lock")
            .push(payment_key.to_string());
    }

    /// Set what `fetch` reports for a payment.
    pub fn set_remote(&self, payment_key: &str, order_id: &str, status: GatewayStatus, amount: i64) {
        self.payments.lock().expect("lock").insert(
            payment_key.to_string(),
            GatewayPayment {
                payment_key: payment_key.to_string(),
                order_id: order_id.to_string(),
                status,
                method: Some("카드".to_string()),
                total_amount: amount,
                balance_amount: Some(amount),
                approved_at: Some(Utc::now()),
            },
        );
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn confirm(
        &self,
        payment_key: &str,
        order_id: &str,
        amount: i64,
    ) -> Result<GatewayPayment, AppError> {
        if self
            .declined
            .lock()
            .expect("lock")
            .iter()
            .any(|k| k == payment_key)
        {
            return Err(AppError::gateway("카드 승인이 거절되었습니다"));
        }
        self.set_remote(payment_key, order_id, GatewayStatus::Done, amount);
        self.fetch(payment_key).await
    }

    async fn fetch(&self, payment_key: &str) -> Result<GatewayPayment, AppError> {
        self.payments
            .lock()
            .expect("lock")
            .get(payment_key)
            .cloned()
            .ok_or_else(|| AppError::gateway("존재하지 않는 결제입니다"))
    }

    async fn cancel(
        &self,
        payment_key: &str,
        _reason: &str,
        amount: Option<i64>,
    ) -> Result<GatewayPayment, AppError> {
        let mut payments = self.payments.lock().expect("lock");
        let payment = payments
            .get_mut(payment_key)
            .ok_or_else(|| AppError::gateway("존재하지 않는 결제입니다"))?;
        let balance = payment.balance_amount.unwrap_or(payment.total_amount);
        let cancelled = amount.unwrap_or(balance);
        payment.balance_amount = Some(balance - cancelled);
        payment.status = if balance - cancelled == 0 {
            GatewayStatus::Canceled
        } else {
            GatewayStatus::PartialCanceled
        };
        Ok(payment.clone())
    }
}
