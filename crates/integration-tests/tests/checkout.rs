//! Checkout page and booking requests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use chefbook_core::Price;
use chefbook_integration_tests::{TestApp, fixtures};
use chefbook_storefront::sanity::memory::InMemoryContentStore;
use rust_decimal::Decimal;

const COMPLETE_FORM: &str =
    "name=Sam+Ortiz&email=sam%40example.com&event_date=2026-11-20&address=12+Harbour+Road&notes=";

fn app_with_rate(rate: Decimal) -> TestApp {
    let mut chef = fixtures::chef("chef-1", true, 0);
    chef.hourly_rate = Price::usd(rate).unwrap();
    TestApp::new(InMemoryContentStore::new().with_chef(chef))
}

fn total_cell(amount: &str) -> String {
    format!(r#"<dd class="order-summary__total">{amount}</dd>"#)
}

#[tokio::test]
async fn total_equals_rate_for_one_hour() {
    let app = app_with_rate(Decimal::from(45));
    let response = app.get("/chefs/chef-1/checkout").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(&total_cell("$45")));
    assert!(response.body.contains("$45/hr"));
}

#[tokio::test]
async fn total_tracks_rate_across_values() {
    let cases = [
        (Decimal::ZERO, "$0"),
        (Decimal::from(120), "$120"),
        (Decimal::new(4550, 2), "$45.50"),
        (Decimal::new(455, 1), "$45.50"),
    ];

    for (rate, expected) in cases {
        let app = app_with_rate(rate);
        let response = app.get("/chefs/chef-1/checkout").await;
        assert!(
            response.body.contains(&total_cell(expected)),
            "rate {rate} should display as {expected}"
        );
    }
}

#[tokio::test]
async fn checkout_renders_form_for_chef() {
    let app = app_with_rate(Decimal::from(45));
    let response = app.get("/chefs/chef-1/checkout").await;

    assert!(response.body.contains(r#"action="/chefs/chef-1/checkout""#));
    assert!(response.body.contains("Book Ana Ruiz"));
}

#[tokio::test]
async fn missing_chef_redirects_to_listing() {
    let app = TestApp::new(InMemoryContentStore::new());
    let response = app.get("/chefs/nobody/checkout").await;

    assert!(response.redirects_to("/chefs"));
    assert!(!response.body.contains("order-summary"));
}

#[tokio::test]
async fn store_outage_redirects_to_listing() {
    let app = TestApp::new(InMemoryContentStore::unavailable("sanity is down"));
    let response = app.get("/chefs/chef-1/checkout").await;

    assert!(response.redirects_to("/chefs"));
}

#[tokio::test]
async fn complete_booking_is_confirmed() {
    let app = app_with_rate(Decimal::from(45));
    let response = app.post_form("/chefs/chef-1/checkout", COMPLETE_FORM).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Booking request sent"));
    assert!(response.body.contains("Sam Ortiz"));
    assert!(response.body.contains(&total_cell("$45")));
}

#[tokio::test]
async fn incomplete_booking_lists_missing_fields() {
    let app = app_with_rate(Decimal::from(45));
    let response = app
        .post_form("/chefs/chef-1/checkout", "name=Sam+Ortiz&email=")
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Email is required"));
    assert!(response.body.contains("Event date is required"));
    assert!(response.body.contains("Address is required"));
    assert!(!response.body.contains("Name is required"));
    assert!(response.body.contains(r#"value="Sam Ortiz""#));
}

#[tokio::test]
async fn booking_for_missing_chef_redirects_to_listing() {
    let app = TestApp::new(InMemoryContentStore::new());
    let response = app.post_form("/chefs/nobody/checkout", COMPLETE_FORM).await;

    assert!(response.redirects_to("/chefs"));
}
