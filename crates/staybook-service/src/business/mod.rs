//! Business-owner applications.

pub mod service;

pub use service::{BusinessService, ReviewDecision, SubmitApplicationRequest};
