//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /chefs
//! GET  /health                 - Health check
//!
//! # Chefs
//! GET  /chefs                  - Chef listing
//! GET  /chefs/{id}             - Chef profile
//! GET  /chefs/{id}/payment     - Hire link target (redirects to checkout)
//! GET  /chefs/{id}/checkout    - Checkout page
//! POST /chefs/{id}/checkout    - Booking request
//!
//! # Menu
//! GET  /menu                   - Menu listing (menu item cards)
//! GET  /dish/{id}              - Dish detail
//!
//! # Assets
//! GET  /static/*               - Static files (CSS, placeholder image)
//! ```
//!
//! Every page reads fresh from the content store on each request.

pub mod chefs;
pub mod checkout;
pub mod menu;

use std::path::Path;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::Request,
    http::{StatusCode, Uri},
    middleware as axum_middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Image shown when a record has no resolved image URL.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

/// Where pages send visitors when a chef cannot be shown.
pub const CHEF_LISTING: &str = "/chefs";

/// Resolve an optional image URL to something renderable.
#[must_use]
pub fn image_src(url: Option<&str>) -> String {
    url.filter(|url| !url.trim().is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}

/// Link rendered under a "not found" message.
pub struct BackLink {
    pub href: &'static str,
    pub label: &'static str,
}

/// Inline "not found" page.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub message: &'static str,
    pub back: Option<BackLink>,
}

impl NotFoundTemplate {
    /// Render with a 404 status.
    pub fn into_not_found(self) -> Response {
        (StatusCode::NOT_FOUND, self).into_response()
    }
}

/// Redirect the bare root to the chef listing.
pub async fn home() -> Redirect {
    Redirect::to(CHEF_LISTING)
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// Unmatched paths.
pub async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Create the chef routes router.
pub fn chef_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chefs::index))
        .route("/{id}", get(chefs::show))
        .route("/{id}/payment", get(chefs::payment))
        .route("/{id}/checkout", get(checkout::show).post(checkout::book))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        // Chef routes
        .nest("/chefs", chef_routes())
        // Menu routes
        .route("/menu", get(menu::index))
        .route("/dish/{id}", get(menu::show))
}

/// Build the full application router with static files and middleware.
///
/// Sentry layers are added by the binary on top of this router.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback)
        .layer(axum_middleware::from_fn(security_headers_middleware))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
