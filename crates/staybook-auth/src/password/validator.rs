//! Password policy enforcement for new passwords.

use staybook_core::config::AuthConfig;
use staybook_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "비밀번호는 {}자 이상이어야 합니다",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_alphabetic()) {
            return Err(AppError::validation("비밀번호에 영문자를 포함해야 합니다"));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("비밀번호에 숫자를 포함해야 합니다"));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Two {
            return Err(AppError::validation(
                "비밀번호가 너무 단순합니다. 더 복잡한 비밀번호를 사용해 주세요",
            ));
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "새 비밀번호는 현재 비밀번호와 달라야 합니다",
            ));
        }
        Ok(())
    }
}
