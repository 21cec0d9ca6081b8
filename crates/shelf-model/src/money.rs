//! Money type for product prices.
//!
//! Amounts are kept in minor units so equality and hashing are exact. The
//! feed sends prices as `{"value": 19.99, "currency": "EUR"}`; that shape is
//! converted on the serde boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ModelError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
    PLN,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::PLN => "PLN",
            Currency::JPY => "JPY",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            "CHF" => Some(Currency::CHF),
            "PLN" => Some(Currency::PLN),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A price with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "PriceRepr", into = "PriceRepr")]
pub struct Money {
    /// Amount in the smallest currency unit (e.g., cents).
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use shelf_model::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::EUR).unwrap();
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Result<Self, ModelError> {
        let multiplier = 10_i64.pow(currency.decimal_places()) as f64;
        let scaled = (amount * multiplier).round();
        if !scaled.is_finite() || scaled.abs() > i64::MAX as f64 {
            return Err(ModelError::InvalidPrice(amount));
        }
        Ok(Self::new(scaled as i64, currency))
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Format the amount without currency (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_amount(), self.currency.code())
    }
}

/// Wire representation of a price.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PriceRepr {
    value: f64,
    currency: String,
}

impl TryFrom<PriceRepr> for Money {
    type Error = ModelError;

    fn try_from(repr: PriceRepr) -> Result<Self, Self::Error> {
        let currency = Currency::from_code(&repr.currency)
            .ok_or_else(|| ModelError::UnknownCurrency(repr.currency.clone()))?;
        Money::from_decimal(repr.value, currency)
    }
}

impl From<Money> for PriceRepr {
    fn from(money: Money) -> Self {
        PriceRepr {
            value: money.to_decimal(),
            currency: money.currency.code().to_string(),
        }
    }
}
