//! Chef listing and profile route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chefbook_core::ChefId;
use serde::Serialize;
use tracing::instrument;

use super::{CHEF_LISTING, NotFoundTemplate, image_src};
use crate::filters;
use crate::sanity::{Chef, ChefSummary, ContentError, ContentResultExt, ContentStore};
use crate::state::AppState;

/// Chef profile display data for templates.
#[derive(Clone)]
pub struct ChefProfileView {
    pub name: String,
    pub position: String,
    pub experience_years: u32,
    pub specialty: String,
    pub image_src: String,
    pub description: String,
    pub available: bool,
    /// Hiring link, present only while the chef accepts bookings.
    pub hire_url: Option<String>,
}

impl From<Chef> for ChefProfileView {
    fn from(chef: Chef) -> Self {
        let hire_url = chef.available.then(|| payment_path(&chef.id));
        Self {
            image_src: image_src(chef.image_url.as_deref()),
            name: chef.name,
            position: chef.position,
            experience_years: chef.experience_years,
            specialty: chef.specialty,
            description: chef.description,
            available: chef.available,
            hire_url,
        }
    }
}

/// Chef listing card display data.
#[derive(Clone)]
pub struct ChefCardView {
    pub href: String,
    pub name: String,
    pub position: String,
    pub image_src: String,
    pub available: bool,
}

impl From<ChefSummary> for ChefCardView {
    fn from(chef: ChefSummary) -> Self {
        Self {
            href: profile_path(&chef.id),
            image_src: image_src(chef.image_url.as_deref()),
            name: chef.name,
            position: chef.position,
            available: chef.available,
        }
    }
}

/// Chef listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "chefs/index.html")]
pub struct ChefsIndexTemplate {
    pub chefs: Vec<ChefCardView>,
}

/// Chef profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "chefs/show.html")]
pub struct ChefShowTemplate {
    pub chef: ChefProfileView,
}

fn profile_path(id: &ChefId) -> String {
    format!("/chefs/{id}")
}

fn payment_path(id: &ChefId) -> String {
    format!("/chefs/{id}/payment")
}

fn checkout_path(id: &ChefId) -> String {
    format!("/chefs/{id}/checkout")
}

/// Parse a chef id taken from the URL path.
///
/// Malformed ids cannot name a document, so they are absent without a fetch.
pub(crate) fn parse_chef_id(raw: &str) -> Option<ChefId> {
    ChefId::parse(raw)
        .inspect_err(|e| tracing::debug!(raw, error = %e, "Rejected chef id"))
        .ok()
}

/// Display chef listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let chefs = state
        .content()
        .chefs()
        .await
        .or_absent()
        .unwrap_or_default();

    ChefsIndexTemplate {
        chefs: chefs.into_iter().map(ChefCardView::from).collect(),
    }
}

/// Display chef profile page.
#[instrument(skip(state), fields(chef_id = %id))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let chef = match parse_chef_id(&id) {
        Some(chef_id) => state.content().chef(&chef_id).await.or_absent(),
        None => None,
    };

    match chef {
        Some(chef) => ChefShowTemplate { chef: chef.into() }.into_response(),
        None => NotFoundTemplate {
            message: "Chef not found",
            back: None,
        }
        .into_not_found(),
    }
}

/// Hire link target: continue to checkout.
#[instrument]
pub async fn payment(Path(id): Path<String>) -> Redirect {
    parse_chef_id(&id).map_or_else(
        || Redirect::to(CHEF_LISTING),
        |chef_id| Redirect::to(&checkout_path(&chef_id)),
    )
}

// =============================================================================
// Static params
// =============================================================================

/// Path parameters for one pre-enumerated chef page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChefParams {
    pub id: ChefId,
}

impl ChefParams {
    /// Profile path for these params.
    #[must_use]
    pub fn path(&self) -> String {
        profile_path(&self.id)
    }
}

/// Enumerate every chef profile path, for build-time generation.
///
/// # Errors
///
/// Returns the content store error; enumeration has no absence fallback.
#[instrument(skip(content))]
pub async fn chef_static_params(
    content: &dyn ContentStore,
) -> Result<Vec<ChefParams>, ContentError> {
    let ids = content.chef_ids().await?;
    tracing::debug!(count = ids.len(), "Enumerated chef ids");
    Ok(ids.into_iter().map(|id| ChefParams { id }).collect())
}
