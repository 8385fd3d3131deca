//! GROQ query definitions and the raw documents they project.
//!
//! Each query selects and renames exactly the fields one page needs.
//! Image references are dereferenced to their asset URL inside the query
//! (`image.asset->url`), so no second lookup is needed.

use rust_decimal::Decimal;
use serde::Deserialize;

/// A named GROQ query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    /// Short name used in logs and errors.
    pub name: &'static str,
    /// GROQ source.
    pub groq: &'static str,
}

// =============================================================================
// Chef queries
// =============================================================================

/// Full profile of one chef. Parameters: `$id`.
pub const CHEF_PROFILE: Query = Query {
    name: "chef profile",
    groq: r#"*[_type == "chef" && _id == $id][0]{
  _id,
  name,
  position,
  experience,
  specialty,
  "imageUrl": image.asset->url,
  description,
  available
}"#,
};

/// Checkout projection of one chef. Parameters: `$id`.
pub const CHEF_CHECKOUT: Query = Query {
    name: "chef checkout",
    groq: r#"*[_type == "chef" && _id == $id][0]{
  _id,
  name,
  position,
  hourlyRate,
  "imageUrl": image.asset->url
}"#,
};

/// IDs of every chef, for route enumeration.
pub const CHEF_IDS: Query = Query {
    name: "chef ids",
    groq: r#"*[_type == "chef"]{ _id }"#,
};

/// Listing projection of every chef.
pub const CHEF_LIST: Query = Query {
    name: "chef list",
    groq: r#"*[_type == "chef"] | order(name asc){
  _id,
  name,
  position,
  "imageUrl": image.asset->url,
  available
}"#,
};

// =============================================================================
// Menu queries
// =============================================================================

/// Every menu item.
pub const MENU_ITEMS: Query = Query {
    name: "menu items",
    groq: r#"*[_type == "menuItem"] | order(name asc){
  _id,
  name,
  description,
  "image": image.asset->url,
  calories,
  priceRange
}"#,
};

/// One menu item. Parameters: `$id`.
pub const MENU_ITEM: Query = Query {
    name: "menu item",
    groq: r#"*[_type == "menuItem" && _id == $id][0]{
  _id,
  name,
  description,
  "image": image.asset->url,
  calories,
  priceRange
}"#,
};

// =============================================================================
// Raw documents
// =============================================================================

/// Document projected by [`CHEF_PROFILE`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChefProfileDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub position: String,
    pub experience: u32,
    pub specialty: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub description: String,
    pub available: bool,
}

/// Document projected by [`CHEF_CHECKOUT`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChefCheckoutDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub position: String,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Document projected by [`CHEF_IDS`].
#[derive(Debug, Clone, Deserialize)]
pub struct IdDocument {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Document projected by [`CHEF_LIST`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChefListDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub available: bool,
}

/// Document projected by [`MENU_ITEMS`] and [`MENU_ITEM`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub calories: u32,
    pub price_range: PriceRangeDocument,
}

/// Embedded `priceRange` object.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PriceRangeDocument {
    pub min: Decimal,
    pub max: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_detail_queries_take_id_param() {
        for query in [CHEF_PROFILE, CHEF_CHECKOUT, MENU_ITEM] {
            assert!(query.groq.contains("_id == $id"), "{}", query.name);
            assert!(query.groq.contains("[0]"), "{}", query.name);
        }
    }

    #[test]
    fn test_profile_document_deserializes() {
        let doc: ChefProfileDocument = serde_json::from_value(json!({
            "_id": "chef-1",
            "name": "Ana Ruiz",
            "position": "Head Chef",
            "experience": 12,
            "specialty": "Basque",
            "imageUrl": null,
            "description": "Wood fire and seafood.",
            "available": true
        }))
        .unwrap();

        assert_eq!(doc.id, "chef-1");
        assert_eq!(doc.experience, 12);
        assert!(doc.image_url.is_none());
    }

    #[test]
    fn test_profile_document_missing_field_fails() {
        let result = serde_json::from_value::<ChefProfileDocument>(json!({
            "_id": "chef-1",
            "name": "Ana Ruiz"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_checkout_document_reads_numeric_rate() {
        let doc: ChefCheckoutDocument = serde_json::from_value(json!({
            "_id": "chef-1",
            "name": "Ana Ruiz",
            "position": "Head Chef",
            "hourlyRate": 45
        }))
        .unwrap();

        assert_eq!(doc.hourly_rate, Decimal::from(45));
    }

    #[test]
    fn test_menu_item_document_deserializes() {
        let doc: MenuItemDocument = serde_json::from_value(json!({
            "_id": "dish-1",
            "name": "Paella",
            "description": "Saffron rice.",
            "image": "https://cdn.sanity.io/images/p/production/paella.jpg",
            "calories": 640,
            "priceRange": { "min": 18, "max": 32.5 }
        }))
        .unwrap();

        assert_eq!(doc.calories, 640);
        assert_eq!(doc.price_range.min, Decimal::from(18));
        assert_eq!(doc.price_range.max, Decimal::new(325, 1));
    }
}
