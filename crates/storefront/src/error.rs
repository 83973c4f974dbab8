//! Unified error handling for page handlers.
//!
//! Provides a unified `AppError` type. Handlers that can fail validation log
//! the error and surface it to the visitor as an `error` notification before
//! returning it, so callers only need the `Result` for their own bookkeeping.

use phonehub_core::{ConversionError, CurrencyError, PasswordError};
use thiserror::Error;

/// Application-level error type for the page engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// Registration password failed validation.
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Currency conversion input was rejected.
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// A handler referenced an element the page layout does not have.
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// A fragment template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    /// Message shown to the visitor in the error notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Password(PasswordError::Mismatch) => "Mật khẩu xác nhận không khớp!".to_string(),
            Self::Password(PasswordError::TooShort { min }) => {
                format!("Mật khẩu phải có ít nhất {min} ký tự!")
            }
            Self::Conversion(err) => match err {
                ConversionError::MissingAmount => "Vui lòng nhập số tiền cần đổi.".to_string(),
                ConversionError::InvalidAmount(_) => "Số tiền không hợp lệ.".to_string(),
                ConversionError::NegativeAmount => "Số tiền không được âm.".to_string(),
                ConversionError::Currency(CurrencyError::Missing) => {
                    "Vui lòng chọn loại tiền tệ.".to_string()
                }
                ConversionError::Currency(CurrencyError::Unsupported(code)) => {
                    format!("Loại tiền tệ không được hỗ trợ: {code}")
                }
                ConversionError::MissingRate(code) => {
                    format!("Loại tiền tệ không được hỗ trợ: {code}")
                }
                ConversionError::Overflow => "Số tiền quá lớn để quy đổi.".to_string(),
            },
            Self::UnknownElement(_) | Self::Template(_) => {
                "Đã xảy ra lỗi, vui lòng thử lại.".to_string()
            }
        }
    }

    /// Log the error at a level matching its cause.
    pub fn report(&self) {
        match self {
            Self::Password(_) | Self::Conversion(_) => {
                tracing::info!(error = %self, "Input rejected");
            }
            Self::UnknownElement(_) | Self::Template(_) => {
                tracing::error!(error = %self, "Handler error");
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
