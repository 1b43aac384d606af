//! Social login: exchange a provider access token for the provider's
//! profile of the signed-in user.

pub mod client;
pub mod profile;

pub use client::{HttpSocialProfileClient, SocialProfileClient};
pub use profile::SocialProfile;
