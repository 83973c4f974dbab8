//! Password type for the registration form.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Errors that can occur when validating a [`Password`].
///
/// Variants are listed in the order the checks run.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The password and its confirmation differ.
    #[error("password confirmation does not match")]
    Mismatch,
    /// The password is shorter than the minimum.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
}

/// A validated password.
///
/// The value is held in a [`SecretString`] so it never shows up in `Debug`
/// output or logs.
///
/// ## Constraints
///
/// - Must equal its confirmation field
/// - Length: at least 6 characters
///
/// ## Examples
///
/// ```
/// use phonehub_core::{Password, PasswordError};
///
/// assert!(Password::confirm("secret1", "secret1").is_ok());
/// assert_eq!(
///     Password::confirm("secret1", "secret2").unwrap_err(),
///     PasswordError::Mismatch
/// );
/// assert_eq!(
///     Password::confirm("abc", "abc").unwrap_err(),
///     PasswordError::TooShort { min: 6 }
/// );
/// ```
#[derive(Clone)]
pub struct Password(SecretString);

impl Password {
    /// Minimum number of characters.
    pub const MIN_LENGTH: usize = 6;

    /// Validate a password against its confirmation.
    ///
    /// The confirmation is checked first, so a short password typed twice
    /// differently reports [`PasswordError::Mismatch`].
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Mismatch`] if the two fields differ, then
    /// [`PasswordError::TooShort`] if the password has fewer than
    /// [`Self::MIN_LENGTH`] characters.
    pub fn confirm(password: &str, confirmation: &str) -> Result<Self, PasswordError> {
        if password != confirmation {
            return Err(PasswordError::Mismatch);
        }

        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(SecretString::from(password.to_owned())))
    }

    /// Number of characters in the password.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.expose_secret().chars().count()
    }

    /// Always false for a validated password.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
