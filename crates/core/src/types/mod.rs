//! Core types for PhoneHub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod currency;
pub mod id;
pub mod password;
pub mod status;

pub use currency::{
    Conversion, ConversionError, CurrencyCode, CurrencyError, ExchangeRateTable, RateTableError,
};
pub use id::TransientId;
pub use password::{Password, PasswordError};
pub use status::*;
