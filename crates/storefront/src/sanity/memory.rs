//! In-memory content store for tests.
//!
//! Holds complete chef documents and projects them the same way the GROQ
//! queries do. Counts every read so tests can assert how many fetches a
//! page made.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chefbook_core::{ChefId, MenuItemId, Price};

use super::types::{Chef, CheckoutChef, ChefSummary, MenuItem};
use super::{ContentError, ContentStore};

/// Every field a chef document carries, before projection.
#[derive(Debug, Clone)]
pub struct ChefRecord {
    pub id: ChefId,
    pub name: String,
    pub position: String,
    pub experience_years: u32,
    pub specialty: String,
    pub image_url: Option<String>,
    pub description: String,
    pub available: bool,
    pub hourly_rate: Price,
}

impl ChefRecord {
    fn profile(&self) -> Chef {
        Chef {
            id: self.id.clone(),
            name: self.name.clone(),
            position: self.position.clone(),
            experience_years: self.experience_years,
            specialty: self.specialty.clone(),
            image_url: self.image_url.clone(),
            description: self.description.clone(),
            available: self.available,
        }
    }

    fn checkout(&self) -> CheckoutChef {
        CheckoutChef {
            id: self.id.clone(),
            name: self.name.clone(),
            position: self.position.clone(),
            hourly_rate: self.hourly_rate,
            image_url: self.image_url.clone(),
        }
    }

    fn summary(&self) -> ChefSummary {
        ChefSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            position: self.position.clone(),
            image_url: self.image_url.clone(),
            available: self.available,
        }
    }
}

/// A [`ContentStore`] backed by vectors.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    chefs: Vec<ChefRecord>,
    menu_items: Vec<MenuItem>,
    /// When set, every read fails with this message.
    outage: Option<String>,
    reads: AtomicUsize,
}

impl InMemoryContentStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read fails as if the remote API were down.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            outage: Some(message.into()),
            ..Self::default()
        }
    }

    /// Add a chef document.
    #[must_use]
    pub fn with_chef(mut self, chef: ChefRecord) -> Self {
        self.chefs.push(chef);
        self
    }

    /// Add a menu item document.
    #[must_use]
    pub fn with_menu_item(mut self, item: MenuItem) -> Self {
        self.menu_items.push(item);
        self
    }

    /// Number of reads served so far, failed ones included.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn begin_read(&self) -> Result<(), ContentError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match &self.outage {
            Some(message) => Err(ContentError::Query {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn find_chef(&self, id: &ChefId, query: &str) -> Result<&ChefRecord, ContentError> {
        self.begin_read()?;
        self.chefs
            .iter()
            .find(|chef| &chef.id == id)
            .ok_or_else(|| ContentError::NotFound(format!("{query}: {id}")))
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn chef(&self, id: &ChefId) -> Result<Chef, ContentError> {
        self.find_chef(id, "chef profile").map(ChefRecord::profile)
    }

    async fn checkout_chef(&self, id: &ChefId) -> Result<CheckoutChef, ContentError> {
        self.find_chef(id, "chef checkout").map(ChefRecord::checkout)
    }

    async fn chef_ids(&self) -> Result<Vec<ChefId>, ContentError> {
        self.begin_read()?;
        Ok(self.chefs.iter().map(|chef| chef.id.clone()).collect())
    }

    async fn chefs(&self) -> Result<Vec<ChefSummary>, ContentError> {
        self.begin_read()?;
        let mut chefs: Vec<ChefSummary> = self.chefs.iter().map(ChefRecord::summary).collect();
        chefs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(chefs)
    }

    async fn menu_items(&self) -> Result<Vec<MenuItem>, ContentError> {
        self.begin_read()?;
        let mut items = self.menu_items.clone();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn menu_item(&self, id: &MenuItemId) -> Result<MenuItem, ContentError> {
        self.begin_read()?;
        self.menu_items
            .iter()
            .find(|item| &item.id == id)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(format!("menu item: {id}")))
    }
}

/// Ready-made documents for tests.
#[allow(clippy::missing_panics_doc, clippy::expect_used)]
pub mod fixtures {
    use chefbook_core::{ChefId, MenuItemId, Price, PriceRange};
    use rust_decimal::Decimal;

    use super::ChefRecord;
    use crate::sanity::types::MenuItem;

    /// A chef with a whole-dollar hourly rate.
    #[must_use]
    pub fn chef(id: &str, available: bool, hourly_rate: u32) -> ChefRecord {
        ChefRecord {
            id: ChefId::parse(id).expect("fixture chef id"),
            name: "Ana Ruiz".to_string(),
            position: "Head Chef".to_string(),
            experience_years: 12,
            specialty: "Basque seafood".to_string(),
            image_url: Some(format!("https://cdn.sanity.io/images/test/production/{id}.jpg")),
            description: "Cooks over wood fire and loves the sea.".to_string(),
            available,
            hourly_rate: Price::usd(Decimal::from(hourly_rate)).expect("fixture rate"),
        }
    }

    /// A menu item priced between `min` and `max` dollars.
    #[must_use]
    pub fn menu_item(id: &str, name: &str, min: u32, max: u32) -> MenuItem {
        let min = Price::usd(Decimal::from(min)).expect("fixture min");
        let max = Price::usd(Decimal::from(max)).expect("fixture max");
        MenuItem {
            id: MenuItemId::parse(id).expect("fixture menu item id"),
            name: name.to_string(),
            description: format!("{name}, slow cooked. Served with bread, salad and a glass of cava."),
            image_url: None,
            calories: 640,
            price_range: PriceRange::new(min, max).expect("fixture range"),
        }
    }
}
