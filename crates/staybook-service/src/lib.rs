//! # staybook-service
//!
//! Business logic service layer for StayBook. Each service orchestrates
//! repositories, the payment gateway, and authentication to implement
//! application-level use cases.
//!
//! The `booking` module holds the pure rules (overlap, pricing, coupon
//! evaluation, lifecycle) that the services apply inside their transactions.
//!
//! Services take all their dependencies as `Arc` references at
//! construction time.

pub mod auth;
pub mod booking;
pub mod business;
pub mod card;
pub mod context;
pub mod coupon;
pub mod hotel;
pub mod payment;
pub mod reservation;
pub mod review;
pub mod support;
pub mod user;
pub mod wishlist;

pub use auth::AuthService;
pub use business::BusinessService;
pub use card::CardService;
pub use context::RequestContext;
pub use coupon::CouponService;
pub use hotel::HotelService;
pub use payment::{PaymentGateway, PaymentService, TossGateway};
pub use reservation::ReservationService;
pub use review::ReviewService;
pub use support::SupportService;
pub use user::UserService;
pub use wishlist::WishlistService;
