//! Repository implementations for all StayBook entities.

pub mod business;
pub mod card;
pub mod coupon;
pub mod faq;
pub mod hotel;
pub mod newsletter;
pub mod notice;
pub mod payment;
pub mod reservation;
pub mod review;
pub mod room;
pub mod user;
pub mod wishlist;

pub use business::BusinessApplicationRepository;
pub use card::CardRepository;
pub use coupon::CouponRepository;
pub use faq::FaqRepository;
pub use hotel::{HotelRepository, HotelSearch};
pub use newsletter::NewsletterRepository;
pub use notice::NoticeRepository;
pub use payment::PaymentRepository;
pub use reservation::ReservationRepository;
pub use review::ReviewRepository;
pub use room::RoomRepository;
pub use user::UserRepository;
pub use wishlist::WishlistRepository;
