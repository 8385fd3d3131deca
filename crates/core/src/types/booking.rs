//! Hourly booking summary shown at checkout.

use serde::Serialize;

use crate::types::price::{Price, PriceError};

/// Hours charged by the checkout page. Bookings are sold one hour at a time.
pub const BOOKED_HOURS: u32 = 1;

/// Line-item summary for an hourly chef booking.
///
/// This is presentation only: the total is derived from the fetched rate and
/// is never an authoritative charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    rate: Price,
    hours: u32,
    total: Price,
}

impl OrderSummary {
    /// Summarize a booking of `hours` at the given hourly `rate`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Overflow` if `rate x hours` does not fit a decimal.
    pub fn for_hours(rate: Price, hours: u32) -> Result<Self, PriceError> {
        Ok(Self {
            rate,
            hours,
            total: rate.times(hours)?,
        })
    }

    /// Hourly rate.
    #[must_use]
    pub const fn rate(&self) -> Price {
        self.rate
    }

    /// Number of hours booked.
    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.hours
    }

    /// `rate x hours`.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_single_hour_total_equals_rate() {
        for cents in [0_i64, 4500, 4550, 999_999] {
            let rate = Price::usd(Decimal::new(cents, 2)).unwrap();
            let summary = OrderSummary::for_hours(rate, BOOKED_HOURS).unwrap();
            assert_eq!(summary.total(), rate);
            assert_eq!(summary.total().to_string(), rate.to_string());
            assert_eq!(summary.hours(), 1);
        }
    }

    #[test]
    fn test_rate_45_displays_45() {
        let rate = Price::usd(Decimal::from(45)).unwrap();
        let summary = OrderSummary::for_hours(rate, BOOKED_HOURS).unwrap();
        assert_eq!(summary.total().to_string(), "$45");
    }

    #[test]
    fn test_multiple_hours() {
        let rate = Price::usd(Decimal::from(60)).unwrap();
        let summary = OrderSummary::for_hours(rate, 3).unwrap();
        assert_eq!(summary.total().to_string(), "$180");
        assert_eq!(summary.rate().to_string(), "$60");
    }
}
