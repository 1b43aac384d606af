//! Payment gateway configuration.

use serde::{Deserialize, Serialize};

/// Toss Payments gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Base URL of the gateway API.
    #[serde(default = "default_api_base")]
    pub toss_api_base: String,
    /// Secret key used as the basic-auth username.
    #[serde(default)]
    pub toss_secret_key: String,
    /// Client key handed to the frontend widget.
    #[serde(default)]
    pub toss_client_key: String,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            toss_api_base: default_api_base(),
            toss_secret_key: String::new(),
            toss_client_key: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.tosspayments.com".to_string()
}

fn default_timeout() -> u64 {
    10
}
