//! Menu listing and dish detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chefbook_core::MenuItemId;
use tracing::instrument;

use super::{BackLink, NotFoundTemplate, image_src};
use crate::filters;
use crate::sanity::{ContentResultExt, MenuItem};
use crate::state::AppState;

/// Menu item card display data.
///
/// A pure projection of an already-fetched item: the card never fetches.
#[derive(Clone)]
pub struct MenuItemCard {
    pub href: String,
    pub name: String,
    /// Full stored text; the card clamps it visually.
    pub description: String,
    pub image_src: String,
    pub calories: u32,
    /// Formatted as `$min - $max`.
    pub price_range: String,
}

impl From<&MenuItem> for MenuItemCard {
    fn from(item: &MenuItem) -> Self {
        Self {
            href: format!("/dish/{}", item.id),
            name: item.name.clone(),
            description: item.description.clone(),
            image_src: image_src(item.image_url.as_deref()),
            calories: item.calories,
            price_range: item.price_range.to_string(),
        }
    }
}

/// Menu item card fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/menu_item_card.html")]
pub struct MenuItemCardTemplate {
    pub card: MenuItemCard,
}

/// Menu listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/index.html")]
pub struct MenuIndexTemplate {
    pub cards: Vec<MenuItemCard>,
}

/// Dish detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/show.html")]
pub struct DishShowTemplate {
    pub dish: MenuItemCard,
}

/// Display menu listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let items = state
        .content()
        .menu_items()
        .await
        .or_absent()
        .unwrap_or_default();

    MenuIndexTemplate {
        cards: items.iter().map(MenuItemCard::from).collect(),
    }
}

/// Display dish detail page.
#[instrument(skip(state), fields(menu_item_id = %id))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let item = match MenuItemId::parse(&id) {
        Ok(item_id) => state.content().menu_item(&item_id).await.or_absent(),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected menu item id");
            None
        }
    };

    match item {
        Some(item) => DishShowTemplate {
            dish: MenuItemCard::from(&item),
        }
        .into_response(),
        None => NotFoundTemplate {
            message: "Dish not found",
            back: Some(BackLink {
                href: "/menu",
                label: "Back to menu",
            }),
        }
        .into_not_found(),
    }
}
