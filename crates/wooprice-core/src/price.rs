//! Whole-number price handling.
//!
//! Every price read from the store and every price typed by the operator is
//! truncated toward zero before it is displayed, staged or sent.

use thiserror::Error;

/// A price string from the store could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price \"{0}\" is not a number")]
    NotNumeric(String),

    #[error("price \"{0}\" is out of range")]
    OutOfRange(String),
}

/// Operator input rejected at the prompt boundary; never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter a search term")]
    EmptyQuery,

    #[error("please enter a price")]
    EmptyPrice,

    #[error("\"{0}\" is not a valid price")]
    NotNumeric(String),

    #[error("price must not be negative (got {0})")]
    Negative(String),
}

/// Converts a store price string to whole currency units.
///
/// The store returns `""` for items without a price; that reads as `0`.
/// Fractional parts are truncated toward zero (`"85.5"` becomes `85`).
///
/// # Errors
///
/// Returns [`PriceError::NotNumeric`] for text that is not a finite number and
/// [`PriceError::OutOfRange`] when the value does not fit an `i64`.
pub fn normalize_price(raw: &str) -> Result<i64, PriceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PriceError::NotNumeric(raw.to_string()))?;
    truncate(value).ok_or_else(|| PriceError::OutOfRange(raw.to_string()))
}

/// Parses a price typed at the prompt.
///
/// Accepts any non-negative finite number and truncates it to an integer.
///
/// # Errors
///
/// Returns [`ValidationError`] for blank, non-numeric or negative input.
pub fn parse_price_input(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyPrice);
    }
    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::NotNumeric(trimmed.to_string()))?;
    if value < 0.0 {
        return Err(ValidationError::Negative(trimmed.to_string()));
    }
    truncate(value).ok_or_else(|| ValidationError::NotNumeric(trimmed.to_string()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}
