//! Unified application error types for StayBook.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The booking rules each get their own
//! [`ErrorKind`] so clients can branch on `errorCode` instead of matching
//! message strings.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Input validation failed (missing or malformed fields).
    Validation,
    /// Authentication failed (missing, invalid, or expired credentials).
    Unauthorized,
    /// The caller is authenticated but does not own the resource.
    Forbidden,
    /// The requested resource was not found.
    NotFound,
    /// A uniqueness conflict (duplicate email, duplicate review, ...).
    Conflict,
    /// The room is fully booked for the requested dates.
    NoAvailability,
    /// The guest count exceeds the room capacity.
    Capacity,
    /// The coupon is outside its validity window.
    Expired,
    /// The coupon has no remaining uses.
    UsageLimitExceeded,
    /// The order amount is below the coupon minimum.
    MinAmount,
    /// The reservation has already been cancelled.
    AlreadyCancelled,
    /// The reservation check-in date has already passed.
    PastCheckIn,
    /// The record is not in a state that allows the requested transition.
    InvalidState,
    /// The payment gateway or a social login provider rejected the call.
    Gateway,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Machine-readable code rendered as `errorCode` in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::NoAvailability => "NO_AVAILABILITY",
            Self::Capacity => "CAPACITY",
            Self::Expired => "EXPIRED",
            Self::UsageLimitExceeded => "USAGE_LIMIT_EXCEEDED",
            Self::MinAmount => "MIN_AMOUNT",
            Self::AlreadyCancelled => "ALREADY_CANCELLED",
            Self::PastCheckIn => "PAST_CHECK_IN",
            Self::InvalidState => "INVALID_STATE",
            Self::Gateway => "GATEWAY",
            Self::Database => "DATABASE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::Internal => "INTERNAL",
        }
    }

    /// Whether the error is a server-side fault whose details must not leak.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Database | Self::Configuration | Self::Serialization | Self::Internal
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The unified application error used throughout StayBook.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a no-availability error.
    pub fn no_availability(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoAvailability, message)
    }

    /// Create a capacity error.
    pub fn capacity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Capacity, message)
    }

    /// Create an expired-coupon error.
    pub fn expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Expired, message)
    }

    /// Create a usage-limit error.
    pub fn usage_limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UsageLimitExceeded, message)
    }

    /// Create a minimum-amount error.
    pub fn min_amount(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MinAmount, message)
    }

    /// Create an already-cancelled error.
    pub fn already_cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyCancelled, message)
    }

    /// Create a past-check-in error.
    pub fn past_check_in(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PastCheckIn, message)
    }

    /// Create an invalid-state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, message)
    }

    /// Create a gateway error.
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Gateway, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
