//! Currency converter form.

use phonehub_core::Conversion;
use serde::Deserialize;
use tracing::instrument;

use crate::elements;
use crate::error::{AppError, Result};
use crate::state::Page;
use crate::surface::Surface;

/// Converter form fields, as typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConverterForm {
    pub amount: String,
    pub from: String,
    pub to: String,
}

impl<S: Surface> Page<S> {
    /// Converter form submitted.
    ///
    /// Writes `Kết quả: <value> <code>` into the result element. Invalid input
    /// leaves the previous result in place and shows an error notification.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Conversion` if the amount or either currency is
    /// missing or invalid.
    #[instrument(skip(self))]
    pub fn submit_conversion(&self, form: &ConverterForm) -> Result<Conversion> {
        let result = self.rates().convert_input(&form.amount, &form.from, &form.to);

        self.with_state(|state| match result {
            Ok(conversion) => {
                state
                    .surface
                    .set_text(elements::CONVERTER_RESULT, &conversion.result_line());
                tracing::debug!(%conversion, "converted");
                Ok(conversion)
            }
            Err(e) => {
                let err = AppError::from(e);
                self.emit_error(state, &err);
                Err(err)
            }
        })
    }
}
