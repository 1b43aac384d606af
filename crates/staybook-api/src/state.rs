//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use staybook_auth::JwtDecoder;
use staybook_core::config::AppConfig;
use staybook_database::DatabasePool;
use staybook_service::{
    AuthService, BusinessService, CardService, CouponService, HotelService, PaymentService,
    ReservationService, ReviewService, SupportService, UserService, WishlistService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT access token validator used by the `AuthUser` extractor
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub hotel_service: Arc<HotelService>,
    pub reservation_service: Arc<ReservationService>,
    pub coupon_service: Arc<CouponService>,
    pub payment_service: Arc<PaymentService>,
    pub review_service: Arc<ReviewService>,
    pub wishlist_service: Arc<WishlistService>,
    pub card_service: Arc<CardService>,
    pub business_service: Arc<BusinessService>,
    pub support_service: Arc<SupportService>,
}
