//! Nutrient extraction
//!
//! Parses the model's reply into the eight canonical values. The reply is
//! trusted positionally: one bare number per line, in canonical order.

use thiserror::Error;

use crate::models::{NutrientField, NutritionRecord, FIELD_COUNT};

/// Reasons a reply cannot become a nutrition record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("Insufficient nutrition data: found {found} of {} values", FIELD_COUNT)]
    InsufficientData { found: usize },

    #[error("Invalid value for {}: {value}", .field.label())]
    InvalidValue { field: NutrientField, value: f64 },
}

/// Parse one trimmed line as a bare real number.
///
/// Anything with extra characters ("12g", "200 kcal") is rejected, as are
/// `NaN` and infinities.
fn parse_value(line: &str) -> Option<f64> {
    line.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Line terminators accepted between values, including lone `\r` and the
/// Unicode line and paragraph separators
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Every bare number in the reply, in order
pub fn extract_values(reply: &str) -> Vec<f64> {
    reply
        .split(is_line_break)
        .map(str::trim)
        .filter_map(|line| {
            let value = parse_value(line);
            if value.is_none() && !line.is_empty() {
                tracing::debug!(line, "Discarding non-numeric reply line");
            }
            value
        })
        .collect()
}

/// Build a record from the first eight values; extra values are ignored
pub fn record_from_values(values: &[f64]) -> Result<NutritionRecord, ExtractError> {
    let Some(first) = values.get(..FIELD_COUNT) else {
        return Err(ExtractError::InsufficientData {
            found: values.len(),
        });
    };

    let mut canonical = [0.0; FIELD_COUNT];
    canonical.copy_from_slice(first);

    NutritionRecord::from_values(canonical)
        .map_err(|(field, value)| ExtractError::InvalidValue { field, value })
}

/// Extract a nutrition record from a model reply
pub fn extract_record(reply: &str) -> Result<NutritionRecord, ExtractError> {
    let values = extract_values(reply);
    if values.len() > FIELD_COUNT {
        tracing::debug!(
            extra = values.len() - FIELD_COUNT,
            "Ignoring values past the canonical eight"
        );
    }

    record_from_values(&values).map_err(|e| {
        tracing::warn!("Model reply rejected: {}", e);
        e
    })
}
