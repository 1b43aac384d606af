//! Review entities.

pub mod model;

pub use model::{Review, ReviewWithAuthor};
