//! Password policy enforcement for new passwords.

use authhub_core::config::auth::AuthConfig;
use authhub_core::error::AppError;

/// Validates password strength against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
    /// Maximum password length.
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
        }
    }

    /// Validates a password against the complexity policy.
    ///
    /// Returns `Ok(())` if the password meets all requirements, or an error
    /// describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if password.chars().count() > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be at most {} characters long",
                self.max_length
            )));
        }

        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(AppError::validation(
                "Password must contain at least one uppercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(AppError::validation(
                "Password must contain at least one lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        if !password.chars().any(|c| !c.is_alphanumeric()) {
            return Err(AppError::validation(
                "Password must contain at least one special character",
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
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn accepts_compliant_password() {
        validator().validate("Qwerty!234").unwrap();
    }

    #[test]
    fn rejects_each_single_class_violation() {
        let v = validator();
        assert!(v.validate("Qw!2").is_err()); // too short
        assert!(v.validate("qwerty!234").is_err()); // no uppercase
        assert!(v.validate("QWERTY!234").is_err()); // no lowercase
        assert!(v.validate("Qwertyu!!!").is_err()); // no digit
        assert!(v.validate("Qwerty1234").is_err()); // no special character
    }

    #[test]
    fn rejects_overlong_password() {
        let long = format!("Aa1!{}", "x".repeat(64));
        assert!(validator().validate(&long).is_err());
    }

    #[test]
    fn rejects_unchanged_password() {
        assert!(
            validator()
                .validate_not_same("Qwerty!234", "Qwerty!234")
                .is_err()
        );
        validator()
            .validate_not_same("Qwerty!234", "NewQwerty!234")
            .unwrap();
    }
}
