//! One-shot currency conversion.

use phonehub_core::{ConversionError, ExchangeRateTable};

/// Convert `amount` from one currency to another and format the result line.
///
/// # Errors
///
/// Returns `ConversionError` if the amount is not a non-negative number or a
/// currency code is unsupported.
pub fn run(amount: &str, from: &str, to: &str) -> Result<String, ConversionError> {
    let conversion = ExchangeRateTable::vnd_base().convert_input(amount, from, to)?;
    tracing::debug!(%conversion, "converted");
    Ok(conversion.result_line())
}
