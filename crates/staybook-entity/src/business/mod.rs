//! Business-owner application entities.

pub mod model;

pub use model::{ApplicationStatus, BusinessApplication, NewBusinessApplication};
