//! Typed records projected from Sanity documents.
//!
//! These types provide a clean API separate from the raw query documents in
//! [`super::queries`]. Every field is present and validated; optional image
//! URLs are `None` rather than empty strings.

use chefbook_core::{ChefId, MenuItemId, Price, PriceRange};
use serde::Serialize;

// =============================================================================
// Chef Types
// =============================================================================

/// Chef as shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chef {
    pub id: ChefId,
    pub name: String,
    /// Role in the kitchen (e.g., "Executive Chef").
    pub position: String,
    /// Years of professional experience.
    pub experience_years: u32,
    pub specialty: String,
    /// Resolved image asset URL.
    pub image_url: Option<String>,
    pub description: String,
    /// Whether the chef currently accepts bookings.
    pub available: bool,
}

/// Chef as shown on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutChef {
    pub id: ChefId,
    pub name: String,
    pub position: String,
    pub hourly_rate: Price,
    pub image_url: Option<String>,
}

/// Chef as shown on the chef listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChefSummary {
    pub id: ChefId,
    pub name: String,
    pub position: String,
    pub image_url: Option<String>,
    pub available: bool,
}

// =============================================================================
// Menu Types
// =============================================================================

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub calories: u32,
    pub price_range: PriceRange,
}
