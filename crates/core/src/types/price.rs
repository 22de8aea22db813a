//! Type-safe price representation using decimal arithmetic.
//!
//! Two directions are covered here:
//! - amounts read from the Admin API, which arrive scaled by 100 and are
//!   normalized with [`Price::from_scaled_amount`]
//! - prices typed by a merchant, validated with [`parse_user_price`]
//!
//! Both always end up with exactly two decimal places.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places used for every displayed or submitted price.
const PRICE_SCALE: u32 = 2;

/// Errors produced while reading a price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// No price was supplied.
    #[error("price is empty")]
    Empty,
    /// The value could not be read as a decimal number.
    #[error("price is not a number: {0}")]
    NotNumeric(String),
    /// The value was negative.
    #[error("price cannot be negative: {0}")]
    Negative(String),
}

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the currency's standard unit, always at scale 2.
    pub amount: Decimal,
    /// ISO 4217 currency code as reported by the platform.
    pub currency_code: String,
}

impl Price {
    /// Create a new price, fixing the amount to two decimal places.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount: fix_scale(amount),
            currency_code: currency_code.into(),
        }
    }

    /// Build a price from an API amount that is scaled by 100.
    ///
    /// `"1999"` becomes `19.99`, `"2000"` becomes `20.00`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotNumeric`] if `raw` is not a decimal string.
    pub fn from_scaled_amount(
        raw: &str,
        currency_code: impl Into<String>,
    ) -> Result<Self, PriceError> {
        let raw = raw.trim();
        let value =
            Decimal::from_str(raw).map_err(|_| PriceError::NotNumeric(raw.to_string()))?;
        Ok(Self::new(value / Decimal::ONE_HUNDRED, currency_code))
    }

    /// Amount formatted with two decimals, without a currency symbol.
    #[must_use]
    pub fn amount_text(&self) -> String {
        format!("{:.2}", self.amount)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        match currency_symbol(&self.currency_code) {
            Some(symbol) => format!("{symbol}{}", self.amount_text()),
            None => format!("{} {}", self.amount_text(), self.currency_code),
        }
    }
}

/// Validate a merchant-entered price and fix it to two decimals.
///
/// # Errors
///
/// Returns a [`PriceError`] when the input is empty, not a plain decimal
/// number, or negative.
pub fn parse_user_price(input: &str) -> Result<Decimal, PriceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PriceError::Empty);
    }

    let value =
        Decimal::from_str(trimmed).map_err(|_| PriceError::NotNumeric(trimmed.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PriceError::Negative(trimmed.to_string()));
    }

    Ok(fix_scale(value))
}

fn fix_scale(value: Decimal) -> Decimal {
    let mut fixed = value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    fixed.rescale(PRICE_SCALE);
    fixed
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" | "CAD" | "AUD" | "NZD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}
