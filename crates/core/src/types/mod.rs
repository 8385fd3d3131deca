//! Core types for Chefbook.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod booking;
pub mod id;
pub mod price;

pub use booking::{BOOKED_HOURS, OrderSummary};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceError, PriceRange};
