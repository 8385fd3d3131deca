//! Type-safe price representation using decimal arithmetic.
//!
//! Prices come from the content store as plain numbers (an hourly rate, the
//! bounds of a menu price range). They are held as [`Decimal`] so a rate of
//! `45` renders as `$45` and never as `$44.999999`.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building prices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// A range whose lower bound exceeds its upper bound.
    #[error("price range minimum {min} exceeds maximum {max}")]
    InvertedRange {
        /// Lower bound.
        min: Decimal,
        /// Upper bound.
        max: Decimal,
    },
    /// The two prices are in different currencies.
    #[error("currency mismatch: {0:?} vs {1:?}")]
    CurrencyMismatch(CurrencyCode, CurrencyCode),
    /// Arithmetic overflowed the decimal range.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// A non-negative price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Create a new price in US dollars.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn usd(amount: Decimal) -> Result<Self, PriceError> {
        Self::new(amount, CurrencyCode::USD)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The ISO 4217 currency code.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Multiply the price by a whole quantity (e.g., booked hours).
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Overflow` if the result does not fit a `Decimal`.
    pub fn times(self, quantity: u32) -> Result<Self, PriceError> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .ok_or(PriceError::Overflow)?;
        Ok(Self { amount, ..self })
    }

    /// Format the bare amount without the currency symbol.
    ///
    /// Whole amounts print without decimals (`45`), amounts with cents print
    /// two places (`45.50`, never `45.5`), anything more precise prints
    /// verbatim so the displayed value always equals the stored one.
    #[must_use]
    pub fn format_amount(&self) -> String {
        let mut normalized = self.amount.normalize();
        if (1..=2).contains(&normalized.scale()) {
            normalized.rescale(2);
        }
        normalized.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency_code.symbol(), self.format_amount())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

/// An inclusive price range, e.g. the cost of a dish across portion sizes.
///
/// Invariant: `min <= max`, both in the same currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    min: Price,
    max: Price,
}

impl PriceRange {
    /// Create a new price range.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::InvertedRange` if `min > max` and
    /// `PriceError::CurrencyMismatch` if the bounds use different currencies.
    pub fn new(min: Price, max: Price) -> Result<Self, PriceError> {
        if min.currency_code != max.currency_code {
            return Err(PriceError::CurrencyMismatch(
                min.currency_code,
                max.currency_code,
            ));
        }
        if min.amount > max.amount {
            return Err(PriceError::InvertedRange {
                min: min.amount,
                max: max.amount,
            });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> Price {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> Price {
        self.max
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}
