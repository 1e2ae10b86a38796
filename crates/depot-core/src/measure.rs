//! # Measurement Encoding
//!
//! Product measurements are exact decimals. SQLite has no decimal type, so
//! they are stored as canonical decimal text (`"1.5"`, `"20.0"`) and parsed
//! back on read.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};

/// Encodes an optional measurement for storage.
pub fn encode(value: Option<Decimal>) -> Option<String> {
    value.map(|decimal| decimal.to_string())
}

/// Decodes a stored measurement.
///
/// ## Arguments
/// * `field` - Column name, used in the error
/// * `raw` - Stored text, `None` for SQL NULL
pub fn decode(field: &str, raw: Option<&str>) -> CoreResult<Option<Decimal>> {
    raw.map(|text| {
        Decimal::from_str(text.trim()).map_err(|e| CoreError::InvalidMeasurement {
            field: field.to_string(),
            value: text.to_string(),
            reason: e.to_string(),
        })
    })
    .transpose()
}
