//! # staybook-auth
//!
//! Authentication building blocks for StayBook.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `social`: provider user-info lookup for Kakao, Google, and Naver login

pub mod jwt;
pub mod password;
pub mod social;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use social::{HttpSocialProfileClient, SocialProfile, SocialProfileClient};
