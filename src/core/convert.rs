//! Amount conversion over a loaded rate table

use crate::core::rate::RateTable;
use std::fmt;
use thiserror::Error;

/// Why a conversion attempt was rejected.
///
/// All variants are recoverable: the caller reports the message and lets the
/// user try again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("amount missing")]
    AmountMissing,

    #[error("amount must be numeric")]
    AmountNotNumeric(String),

    #[error("amount must be positive")]
    AmountNotPositive,

    #[error("unknown currency code")]
    UnknownCurrency(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// One conversion as entered by the user.
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    pub source: &'a str,
    pub destination: &'a str,
    pub amount: &'a str,
}

impl<'a> ConversionRequest<'a> {
    pub fn new(source: &'a str, destination: &'a str, amount: &'a str) -> Self {
        Self {
            source,
            destination,
            amount,
        }
    }
}

/// A successful conversion, rendered as `<value to 4 dp> <code>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub value: f64,
    pub code: String,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} {}", self.value, self.code)
    }
}

/// Parses a user-entered amount. A decimal comma is accepted.
pub fn parse_amount(raw: &str) -> Result<f64, ConversionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::AmountMissing);
    }

    let amount: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| ConversionError::AmountNotNumeric(trimmed.to_string()))?;

    // "inf" and "NaN" parse as f64 but are not amounts
    if !amount.is_finite() {
        return Err(ConversionError::AmountNotNumeric(trimmed.to_string()));
    }
    if amount <= 0.0 {
        return Err(ConversionError::AmountNotPositive);
    }
    Ok(amount)
}

/// Stateless converter that pivots through the base currency.
#[derive(Debug, Clone, Copy)]
pub struct ConversionEngine<'t> {
    table: &'t RateTable,
}

impl<'t> ConversionEngine<'t> {
    pub fn new(table: &'t RateTable) -> Self {
        Self { table }
    }

    /// Mid rate for a display label such as `USD dolar amerykański`.
    pub fn rate_of(&self, label: &str) -> Option<f64> {
        self.table.find_by_label(label).map(|e| e.mid)
    }

    pub fn convert(&self, request: &ConversionRequest<'_>) -> Result<Conversion, ConversionError> {
        let amount = parse_amount(request.amount)?;

        let source_rate = self
            .rate_of(request.source)
            .ok_or_else(|| ConversionError::UnknownCurrency(request.source.to_string()))?;
        let destination_rate = self
            .rate_of(request.destination)
            .ok_or_else(|| ConversionError::UnknownCurrency(request.destination.to_string()))?;

        let in_base = amount * source_rate;
        let value = in_base / destination_rate;
        if !value.is_finite() {
            return Err(ConversionError::InvalidInput(format!(
                "result of converting {amount} is out of range"
            )));
        }

        let code = request
            .destination
            .split_whitespace()
            .next()
            .ok_or_else(|| ConversionError::InvalidInput("empty destination label".to_string()))?
            .to_string();

        Ok(Conversion { value, code })
    }
}
