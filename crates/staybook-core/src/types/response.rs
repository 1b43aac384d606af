//! Response envelope shared by every API endpoint.

use serde::{Deserialize, Serialize};

/// Outcome marker rendered as `resultCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    /// The request succeeded.
    Success,
    /// The request failed; `errorCode` carries the reason.
    Fail,
}

/// `{ resultCode, message, data, errorCode? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Success or failure.
    pub result_code: ResultCode,
    /// Human-readable message for the end user.
    pub message: String,
    /// Payload; `null` on failure.
    pub data: Option<T>,
    /// Machine-readable error code, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            result_code: ResultCode::Success,
            message: message.into(),
            data: Some(data),
            error_code: None,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without a payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            result_code: ResultCode::Success,
            message: message.into(),
            data: None,
            error_code: None,
        }
    }

    /// Failure response.
    pub fn fail(message: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            result_code: ResultCode::Fail,
            message: message.into(),
            data: None,
            error_code: Some(error_code.into()),
        }
    }
}
