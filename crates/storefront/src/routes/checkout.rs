//! Checkout route handlers.
//!
//! The checkout shows a booking form and an order summary for one chef. The
//! summary is a presentation of the fetched hourly rate, not a charge.
//! Submitting the form only checks that required fields are present; nothing
//! is stored, charged or sent.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chefbook_core::{BOOKED_HOURS, OrderSummary, PriceError};
use serde::Deserialize;
use tracing::instrument;

use super::chefs::parse_chef_id;
use super::{CHEF_LISTING, image_src};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::sanity::{CheckoutChef, ContentResultExt};
use crate::state::AppState;

/// Checkout display data for templates.
#[derive(Clone)]
pub struct CheckoutView {
    pub chef_id: String,
    pub name: String,
    pub position: String,
    pub image_src: String,
    pub summary: OrderSummaryView,
}

/// Order summary display data.
#[derive(Clone)]
pub struct OrderSummaryView {
    pub rate: String,
    pub hours: u32,
    pub total: String,
}

impl From<OrderSummary> for OrderSummaryView {
    fn from(summary: OrderSummary) -> Self {
        Self {
            rate: summary.rate().to_string(),
            hours: summary.hours(),
            total: summary.total().to_string(),
        }
    }
}

impl TryFrom<CheckoutChef> for CheckoutView {
    type Error = PriceError;

    fn try_from(chef: CheckoutChef) -> std::result::Result<Self, Self::Error> {
        let summary = OrderSummary::for_hours(chef.hourly_rate, BOOKED_HOURS)?;
        Ok(Self {
            chef_id: chef.id.into_inner(),
            image_src: image_src(chef.image_url.as_deref()),
            name: chef.name,
            position: chef.position,
            summary: summary.into(),
        })
    }
}

/// Booking form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
}

impl BookingRequest {
    /// Labels of required fields left blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Event date", &self.event_date),
            ("Address", &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub chef: CheckoutView,
    pub form: BookingRequest,
    pub errors: Vec<String>,
}

/// Booking confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmed.html")]
pub struct BookingConfirmedTemplate {
    pub chef: CheckoutView,
    pub booking: BookingRequest,
}

async fn fetch_checkout_chef(state: &AppState, raw_id: &str) -> Option<CheckoutChef> {
    let chef_id = parse_chef_id(raw_id)?;
    state.content().checkout_chef(&chef_id).await.or_absent()
}

/// Display checkout page.
///
/// Redirects to the chef listing when the chef cannot be fetched.
#[instrument(skip(state), fields(chef_id = %id))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let Some(chef) = fetch_checkout_chef(&state, &id).await else {
        return Ok(Redirect::to(CHEF_LISTING).into_response());
    };

    Ok(CheckoutTemplate {
        chef: CheckoutView::try_from(chef)?,
        form: BookingRequest::default(),
        errors: Vec::new(),
    }
    .into_response())
}

/// Handle a booking request.
///
/// Re-renders the checkout with messages (422) when required fields are
/// missing, otherwise shows a confirmation.
#[instrument(skip(state, form), fields(chef_id = %id))]
pub async fn book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookingRequest>,
) -> Result<Response> {
    let Some(chef) = fetch_checkout_chef(&state, &id).await else {
        return Ok(Redirect::to(CHEF_LISTING).into_response());
    };
    let chef = CheckoutView::try_from(chef)?;

    let missing = form.missing_fields();
    if !missing.is_empty() {
        tracing::info!(?missing, "Booking request incomplete");
        let errors = missing
            .iter()
            .map(|label| format!("{label} is required"))
            .collect();
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            CheckoutTemplate {
                chef,
                form,
                errors,
            },
        )
            .into_response());
    }

    add_breadcrumb(
        "checkout",
        "Booking request received",
        Some(&[("chef_id", chef.chef_id.as_str())]),
    );
    tracing::info!("Booking request received");

    Ok(BookingConfirmedTemplate {
        chef,
        booking: form,
    }
    .into_response())
}
