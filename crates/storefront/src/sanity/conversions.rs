//! Conversions from raw query documents to validated records.

use chefbook_core::{ChefId, DocumentIdError, MenuItemId, Price, PriceRange};

use super::ContentError;
use super::queries::{
    CHEF_CHECKOUT, CHEF_IDS, CHEF_LIST, CHEF_PROFILE, ChefCheckoutDocument, ChefListDocument,
    ChefProfileDocument, IdDocument, MENU_ITEM, MenuItemDocument, Query,
};
use super::types::{Chef, CheckoutChef, ChefSummary, MenuItem};

fn invalid_id(query: Query, err: &DocumentIdError) -> ContentError {
    ContentError::Invalid {
        query: query.name,
        field: "_id",
        reason: err.to_string(),
    }
}

fn chef_id(query: Query, raw: &str) -> Result<ChefId, ContentError> {
    ChefId::parse(raw).map_err(|e| invalid_id(query, &e))
}

/// Empty asset URLs mean "no image".
fn image_url(raw: Option<String>) -> Option<String> {
    raw.filter(|url| !url.trim().is_empty())
}

pub fn convert_chef(doc: ChefProfileDocument) -> Result<Chef, ContentError> {
    Ok(Chef {
        id: chef_id(CHEF_PROFILE, &doc.id)?,
        name: doc.name,
        position: doc.position,
        experience_years: doc.experience,
        specialty: doc.specialty,
        image_url: image_url(doc.image_url),
        description: doc.description,
        available: doc.available,
    })
}

pub fn convert_checkout_chef(doc: ChefCheckoutDocument) -> Result<CheckoutChef, ContentError> {
    let hourly_rate = Price::usd(doc.hourly_rate).map_err(|e| ContentError::Invalid {
        query: CHEF_CHECKOUT.name,
        field: "hourlyRate",
        reason: e.to_string(),
    })?;

    Ok(CheckoutChef {
        id: chef_id(CHEF_CHECKOUT, &doc.id)?,
        name: doc.name,
        position: doc.position,
        hourly_rate,
        image_url: image_url(doc.image_url),
    })
}

pub fn convert_chef_ids(docs: Vec<IdDocument>) -> Result<Vec<ChefId>, ContentError> {
    docs.into_iter()
        .map(|doc| chef_id(CHEF_IDS, &doc.id))
        .collect()
}

pub fn convert_chef_summary(doc: ChefListDocument) -> Result<ChefSummary, ContentError> {
    Ok(ChefSummary {
        id: chef_id(CHEF_LIST, &doc.id)?,
        name: doc.name,
        position: doc.position,
        image_url: image_url(doc.image_url),
        available: doc.available,
    })
}

/// Convert a menu item document. `query` names the query it came from.
pub fn convert_menu_item(query: Query, doc: MenuItemDocument) -> Result<MenuItem, ContentError> {
    let invalid_price = |e: chefbook_core::PriceError| ContentError::Invalid {
        query: query.name,
        field: "priceRange",
        reason: e.to_string(),
    };

    let min = Price::usd(doc.price_range.min).map_err(invalid_price)?;
    let max = Price::usd(doc.price_range.max).map_err(invalid_price)?;
    let price_range = PriceRange::new(min, max).map_err(invalid_price)?;

    Ok(MenuItem {
        id: MenuItemId::parse(&doc.id).map_err(|e| invalid_id(query, &e))?,
        name: doc.name,
        description: doc.description,
        image_url: image_url(doc.image),
        calories: doc.calories,
        price_range,
    })
}

/// Convert the single-item projection.
pub fn convert_menu_item_detail(doc: MenuItemDocument) -> Result<MenuItem, ContentError> {
    convert_menu_item(MENU_ITEM, doc)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::super::queries::{MENU_ITEMS, PriceRangeDocument};
    use super::*;

    fn profile_doc() -> ChefProfileDocument {
        ChefProfileDocument {
            id: "chef-1".to_string(),
            name: "Ana Ruiz".to_string(),
            position: "Head Chef".to_string(),
            experience: 12,
            specialty: "Basque".to_string(),
            image_url: Some(String::new()),
            description: "Wood fire and seafood.".to_string(),
            available: true,
        }
    }

    fn menu_doc(min: i64, max: i64) -> MenuItemDocument {
        MenuItemDocument {
            id: "dish-1".to_string(),
            name: "Paella".to_string(),
            description: "Saffron rice.".to_string(),
            image: None,
            calories: 640,
            price_range: PriceRangeDocument {
                min: Decimal::from(min),
                max: Decimal::from(max),
            },
        }
    }

    #[test]
    fn test_convert_chef_normalizes_empty_image() {
        let chef = convert_chef(profile_doc()).unwrap();
        assert_eq!(chef.id.as_str(), "chef-1");
        assert!(chef.image_url.is_none());
        assert_eq!(chef.experience_years, 12);
    }

    #[test]
    fn test_convert_chef_rejects_empty_id() {
        let mut doc = profile_doc();
        doc.id = String::new();
        let err = convert_chef(doc).unwrap_err();
        assert!(matches!(err, ContentError::Invalid { field: "_id", .. }));
    }

    #[test]
    fn test_convert_checkout_chef_rejects_negative_rate() {
        let doc = ChefCheckoutDocument {
            id: "chef-1".to_string(),
            name: "Ana Ruiz".to_string(),
            position: "Head Chef".to_string(),
            hourly_rate: Decimal::from(-5),
            image_url: None,
        };
        let err = convert_checkout_chef(doc).unwrap_err();
        assert!(matches!(
            err,
            ContentError::Invalid {
                field: "hourlyRate",
                ..
            }
        ));
    }

    #[test]
    fn test_convert_menu_item_rejects_inverted_range() {
        let err = convert_menu_item(MENU_ITEMS, menu_doc(30, 10)).unwrap_err();
        assert!(matches!(
            err,
            ContentError::Invalid {
                query: "menu items",
                field: "priceRange",
                ..
            }
        ));
    }

    #[test]
    fn test_convert_menu_item_keeps_description_verbatim() {
        let item = convert_menu_item_detail(menu_doc(10, 30)).unwrap();
        assert_eq!(item.description, "Saffron rice.");
        assert_eq!(item.price_range.to_string(), "$10 - $30");
    }

    #[test]
    fn test_convert_chef_ids_fails_on_first_bad_id() {
        let docs = vec![
            IdDocument {
                id: "chef-1".to_string(),
            },
            IdDocument { id: " ".to_string() },
        ];
        assert!(convert_chef_ids(docs).is_err());
    }

    #[test]
    fn test_convert_chef_summary_rejects_bad_id() {
        let doc = ChefListDocument {
            id: "chef 1".to_string(),
            name: "Ana Ruiz".to_string(),
            position: "Head Chef".to_string(),
            image_url: None,
            available: true,
        };
        let err = convert_chef_summary(doc).unwrap_err();
        assert!(matches!(
            err,
            ContentError::Invalid {
                query: "chef list",
                field: "_id",
                ..
            }
        ));
    }
}
