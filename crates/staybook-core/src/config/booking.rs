//! Reservation workflow configuration.

use serde::{Deserialize, Serialize};

/// Reservation creation behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// When `true`, a new reservation is stored as confirmed and paid together
    /// with a `paid` payment record. When `false`, it starts pending and waits
    /// for the payment intent/confirm flow.
    #[serde(default = "default_confirm_on_create")]
    pub confirm_on_create: bool,
    /// Maximum number of nights a single reservation may span.
    #[serde(default = "default_max_nights")]
    pub max_nights: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            confirm_on_create: default_confirm_on_create(),
            max_nights: default_max_nights(),
        }
    }
}

fn default_confirm_on_create() -> bool {
    true
}

fn default_max_nights() -> i64 {
    90
}
