//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use staybook_auth::{
    HttpSocialProfileClient, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator,
};
use staybook_core::config::AppConfig;
use staybook_core::error::AppError;
use staybook_database::DatabasePool;
use staybook_database::repositories::{
    BusinessApplicationRepository, CardRepository, CouponRepository, FaqRepository,
    HotelRepository, NewsletterRepository, NoticeRepository, PaymentRepository,
    ReservationRepository, ReviewRepository, RoomRepository, UserRepository, WishlistRepository,
};
use staybook_service::{
    AuthService, BusinessService, CardService, CouponService, HotelService, PaymentGateway,
    PaymentService, ReservationService, ReviewService, SupportService, TossGateway, UserService,
    WishlistService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Wires repositories and services with the Toss Payments gateway.
pub fn build_state(config: AppConfig, db: DatabasePool) -> Result<AppState, AppError> {
    let gateway = Arc::new(TossGateway::new(config.payment.clone())?);
    build_state_with_gateway(config, db, gateway)
}

/// Wires repositories and services around the given payment gateway.
pub fn build_state_with_gateway(
    config: AppConfig,
    db: DatabasePool,
    gateway: Arc<dyn PaymentGateway>,
) -> Result<AppState, AppError> {
    let pool = db.pool().clone();

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let hotel_repo = Arc::new(HotelRepository::new(pool.clone()));
    let room_repo = Arc::new(RoomRepository::new(pool.clone()));
    let reservation_repo = Arc::new(ReservationRepository::new(pool.clone()));
    let coupon_repo = Arc::new(CouponRepository::new(pool.clone()));
    let payment_repo = Arc::new(PaymentRepository::new(pool.clone()));
    let review_repo = Arc::new(ReviewRepository::new(pool.clone()));
    let wishlist_repo = Arc::new(WishlistRepository::new(pool.clone()));
    let card_repo = Arc::new(CardRepository::new(pool.clone()));
    let application_repo = Arc::new(BusinessApplicationRepository::new(pool.clone()));
    let notice_repo = Arc::new(NoticeRepository::new(pool.clone()));
    let faq_repo = Arc::new(FaqRepository::new(pool.clone()));
    let newsletter_repo = Arc::new(NewsletterRepository::new(pool));

    // ── Auth ─────────────────────────────────────────────────────
    let hasher = Arc::new(PasswordHasher::new());
    let validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let social = Arc::new(HttpSocialProfileClient::new(config.social.clone())?);

    // ── Services ─────────────────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&hasher),
        Arc::clone(&validator),
        jwt_encoder,
        Arc::clone(&jwt_decoder),
        social,
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        hasher,
        validator,
    ));
    let hotel_service = Arc::new(HotelService::new(
        Arc::clone(&hotel_repo),
        Arc::clone(&room_repo),
    ));
    let reservation_service = Arc::new(ReservationService::new(
        db.clone(),
        room_repo,
        Arc::clone(&hotel_repo),
        Arc::clone(&reservation_repo),
        Arc::clone(&coupon_repo),
        Arc::clone(&payment_repo),
        config.booking.clone(),
    ));
    let coupon_service = Arc::new(CouponService::new(coupon_repo));
    let payment_service = Arc::new(PaymentService::new(
        db.clone(),
        payment_repo,
        Arc::clone(&reservation_repo),
        gateway,
    ));
    let review_service = Arc::new(ReviewService::new(
        db.clone(),
        review_repo,
        reservation_repo,
        Arc::clone(&hotel_repo),
    ));
    let wishlist_service = Arc::new(WishlistService::new(wishlist_repo, hotel_repo));
    let card_service = Arc::new(CardService::new(card_repo));
    let business_service = Arc::new(BusinessService::new(
        db.clone(),
        application_repo,
        user_repo,
    ));
    let support_service = Arc::new(SupportService::new(notice_repo, faq_repo, newsletter_repo));

    Ok(AppState {
        config: Arc::new(config),
        db,
        jwt_decoder,
        auth_service,
        user_service,
        hotel_service,
        reservation_service,
        coupon_service,
        payment_service,
        review_service,
        wishlist_service,
        card_service,
        business_service,
        support_service,
    })
}

/// Runs the StayBook server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config, db.clone())?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "StayBook server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if tokio::time::timeout(grace, db.close()).await.is_err() {
        tracing::warn!(grace_seconds = grace.as_secs(), "Database pool did not close in time");
    }
    tracing::info!("StayBook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
