//! Notices, FAQs, and the newsletter.

pub mod service;

pub use service::SupportService;
