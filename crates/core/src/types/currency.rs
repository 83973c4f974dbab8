//! Currency codes, the fixed exchange-rate table and conversion.
//!
//! Every rate is expressed as the value of one unit of the currency in the
//! table's base currency, so the base currency always maps to exactly 1.
//! Conversion goes through the base: `amount * rate[from] / rate[to]`.
//!
//! ```
//! use phonehub_core::{CurrencyCode, ExchangeRateTable};
//! use rust_decimal::Decimal;
//!
//! let table = ExchangeRateTable::vnd_base();
//! let result = table
//!     .convert(Decimal::from(100), CurrencyCode::USD, CurrencyCode::VND)
//!     .unwrap();
//! assert_eq!(result.to_string(), "2400000.00 VND");
//! ```

use core::fmt;
use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for a converted amount.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// No currency was selected.
    #[error("currency code cannot be empty")]
    Missing,
    /// The code is not one of the supported currencies.
    #[error("unsupported currency code: {0}")]
    Unsupported(String),
}

/// Errors that can occur while converting an amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The amount field is empty.
    #[error("amount cannot be empty")]
    MissingAmount,
    /// The amount is not a decimal number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// The amount is below zero.
    #[error("amount must not be negative")]
    NegativeAmount,
    /// A currency field could not be parsed.
    #[error(transparent)]
    Currency(#[from] CurrencyError),
    /// The rate table has no entry for the currency.
    #[error("no exchange rate for {0}")]
    MissingRate(CurrencyCode),
    /// The intermediate value does not fit in a decimal.
    #[error("amount is too large to convert")]
    Overflow,
}

/// Errors that can occur when building an [`ExchangeRateTable`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RateTableError {
    /// The base currency has no entry.
    #[error("base currency {0} has no rate")]
    MissingBase(CurrencyCode),
    /// The base currency does not map to 1.
    #[error("base currency {base} must map to 1, got {rate}")]
    BaseNotUnity {
        /// Base currency of the table.
        base: CurrencyCode,
        /// The rate that was supplied for it.
        rate: Decimal,
    },
    /// A rate is zero or negative.
    #[error("rate for {0} must be positive")]
    NonPositiveRate(CurrencyCode),
}

/// Supported currency codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum CurrencyCode {
    #[default]
    VND,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Every supported code, in display order.
    pub const ALL: [Self; 3] = [Self::VND, Self::USD, Self::EUR];

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::VND => "VND",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CurrencyError::Missing);
        }

        Self::ALL
            .into_iter()
            .find(|code| code.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CurrencyError::Unsupported(trimmed.to_owned()))
    }
}

/// A converted amount, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Amount with exactly [`DISPLAY_DECIMALS`] decimal places.
    pub amount: Decimal,
    /// Currency the amount is expressed in.
    pub currency: CurrencyCode,
}

impl Conversion {
    fn rounded(raw: Decimal, currency: CurrencyCode) -> Self {
        let mut amount =
            raw.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(DISPLAY_DECIMALS);
        Self { amount, currency }
    }

    /// The result line shown under the converter form.
    #[must_use]
    pub fn result_line(&self) -> String {
        format!("Kết quả: {self}")
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Immutable mapping from currency to its value in the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRateTable {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, Decimal>,
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        Self::vnd_base()
    }
}

impl ExchangeRateTable {
    /// Build a table, checking that the base maps to 1 and every rate is positive.
    ///
    /// # Errors
    ///
    /// Returns [`RateTableError`] if the base currency is missing or not 1,
    /// or if any rate is zero or negative.
    pub fn new(
        base: CurrencyCode,
        rates: impl IntoIterator<Item = (CurrencyCode, Decimal)>,
    ) -> Result<Self, RateTableError> {
        let rates: BTreeMap<_, _> = rates.into_iter().collect();

        if let Some((&code, _)) = rates.iter().find(|(_, rate)| **rate <= Decimal::ZERO) {
            return Err(RateTableError::NonPositiveRate(code));
        }

        match rates.get(&base) {
            None => return Err(RateTableError::MissingBase(base)),
            Some(&rate) if rate != Decimal::ONE => {
                return Err(RateTableError::BaseNotUnity { base, rate });
            }
            Some(_) => {}
        }

        Ok(Self { base, rates })
    }

    /// The converter page's table: VND base, 1 USD = 24,000 VND, 1 EUR = 26,000 VND.
    #[must_use]
    pub fn vnd_base() -> Self {
        Self {
            base: CurrencyCode::VND,
            rates: BTreeMap::from([
                (CurrencyCode::VND, Decimal::ONE),
                (CurrencyCode::USD, Decimal::from(24_000)),
                (CurrencyCode::EUR, Decimal::from(26_000)),
            ]),
        }
    }

    /// Base currency of the table.
    #[must_use]
    pub const fn base(&self) -> CurrencyCode {
        self.base
    }

    /// Value of one unit of `code` in the base currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::MissingRate`] if the table has no entry.
    pub fn rate(&self, code: CurrencyCode) -> Result<Decimal, ConversionError> {
        self.rates
            .get(&code)
            .copied()
            .ok_or(ConversionError::MissingRate(code))
    }

    /// Convert `amount` from one currency to another.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, a currency has no rate,
    /// or the arithmetic overflows.
    pub fn convert(
        &self,
        amount: Decimal,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<Conversion, ConversionError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ConversionError::NegativeAmount);
        }

        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;

        let in_base = amount
            .checked_mul(from_rate)
            .ok_or(ConversionError::Overflow)?;
        let raw = in_base
            .checked_div(to_rate)
            .ok_or(ConversionError::Overflow)?;

        Ok(Conversion::rounded(raw, to))
    }

    /// Convert raw form input (amount, source code, destination code).
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is empty or not a number, or if either
    /// code is empty or unsupported.
    pub fn convert_input(
        &self,
        amount: &str,
        from: &str,
        to: &str,
    ) -> Result<Conversion, ConversionError> {
        let amount = parse_amount(amount)?;
        let from: CurrencyCode = from.parse()?;
        let to: CurrencyCode = to.parse()?;
        self.convert(amount, from, to)
    }
}

/// Parse an amount field.
fn parse_amount(input: &str) -> Result<Decimal, ConversionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::MissingAmount);
    }

    Decimal::from_str(trimmed).map_err(|_| ConversionError::InvalidAmount(trimmed.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> ExchangeRateTable {
        ExchangeRateTable::vnd_base()
    }

    #[test]
    fn test_usd_to_vnd() {
        let result = table()
            .convert(Decimal::from(100), CurrencyCode::USD, CurrencyCode::VND)
            .unwrap();
        assert_eq!(result.amount.to_string(), "2400000.00");
        assert_eq!(result.currency, CurrencyCode::VND);
    }

    #[test]
    fn test_vnd_to_usd_rounds_to_zero() {
        let result = table()
            .convert(Decimal::from(100), CurrencyCode::VND, CurrencyCode::USD)
            .unwrap();
        assert_eq!(result.amount.to_string(), "0.00");
    }

    #[test]
    fn test_eur_to_usd() {
        // 10 EUR = 260,000 VND = 10.8333... USD
        let result = table()
            .convert(Decimal::from(10), CurrencyCode::EUR, CurrencyCode::USD)
            .unwrap();
        assert_eq!(result.amount.to_string(), "10.83");
    }

    #[test]
    fn test_result_line() {
        let result = table().convert_input("100", "USD", "VND").unwrap();
        assert_eq!(result.result_line(), "Kết quả: 2400000.00 VND");
    }

    #[test]
    fn test_convert_input_rejects_unknown_code() {
        assert_eq!(
            table().convert_input("1", "JPY", "VND"),
            Err(ConversionError::Currency(CurrencyError::Unsupported(
                "JPY".to_owned()
            )))
        );
    }

    #[test]
    fn test_convert_input_rejects_missing_code() {
        assert_eq!(
            table().convert_input("1", "USD", " "),
            Err(ConversionError::Currency(CurrencyError::Missing))
        );
    }

    #[test]
    fn test_convert_input_rejects_bad_amounts() {
        assert_eq!(
            table().convert_input("", "USD", "VND"),
            Err(ConversionError::MissingAmount)
        );
        assert!(matches!(
            table().convert_input("abc", "USD", "VND"),
            Err(ConversionError::InvalidAmount(_))
        ));
        assert_eq!(
            table().convert_input("-5", "USD", "VND"),
            Err(ConversionError::NegativeAmount)
        );
    }

    #[test]
    fn test_parse_code_is_case_insensitive() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert_eq!(" EUR ".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
    }

    #[test]
    fn test_new_table_requires_unity_base() {
        let err = ExchangeRateTable::new(
            CurrencyCode::USD,
            [(CurrencyCode::USD, Decimal::from(2))],
        )
        .unwrap_err();
        assert!(matches!(err, RateTableError::BaseNotUnity { .. }));

        let err = ExchangeRateTable::new(CurrencyCode::EUR, [(CurrencyCode::VND, Decimal::ONE)])
            .unwrap_err();
        assert_eq!(err, RateTableError::MissingBase(CurrencyCode::EUR));
    }

    #[test]
    fn test_new_table_rejects_non_positive_rates() {
        let err = ExchangeRateTable::new(
            CurrencyCode::VND,
            [
                (CurrencyCode::VND, Decimal::ONE),
                (CurrencyCode::USD, Decimal::ZERO),
            ],
        )
        .unwrap_err();
        assert_eq!(err, RateTableError::NonPositiveRate(CurrencyCode::USD));
    }

    #[test]
    fn test_partial_table_reports_missing_rate() {
        let table =
            ExchangeRateTable::new(CurrencyCode::VND, [(CurrencyCode::VND, Decimal::ONE)]).unwrap();
        assert_eq!(
            table.convert(Decimal::ONE, CurrencyCode::VND, CurrencyCode::USD),
            Err(ConversionError::MissingRate(CurrencyCode::USD))
        );
    }

    fn any_code() -> impl Strategy<Value = CurrencyCode> {
        prop::sample::select(CurrencyCode::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_identity_conversion(cents in 0i64..100_000_000_000, code in any_code()) {
            let amount = Decimal::new(cents, 2);
            let result = table().convert(amount, code, code).unwrap();
            prop_assert_eq!(result.amount, amount);
        }

        #[test]
        fn prop_round_trip_within_display_tolerance(
            cents in 0i64..100_000_000_000,
            from in any_code(),
            to in any_code(),
        ) {
            let table = table();
            let amount = Decimal::new(cents, 2);
            let there = table.convert(amount, from, to).unwrap();
            let back = table.convert(there.amount, to, from).unwrap();

            // Each leg is off by at most half a display unit; the first leg's
            // error is scaled by the rate ratio on the way back.
            let half_unit = Decimal::new(5, 3);
            let ratio = table.rate(to).unwrap() / table.rate(from).unwrap();
            let tolerance = half_unit * ratio + half_unit;
            prop_assert!((back.amount - amount).abs() <= tolerance);
        }
    }
}
