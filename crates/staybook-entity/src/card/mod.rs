//! Saved payment card entities.

pub mod model;

pub use model::{Card, NewCard};
