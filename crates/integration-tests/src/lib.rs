//! Integration tests for Chefbook.
//!
//! Tests drive the full storefront router (middleware, static files and
//! templates included) with `tower::ServiceExt::oneshot`, backed by an
//! in-memory content store. No network or running server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p chefbook-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chefbook_storefront::routes::build_router;
use chefbook_storefront::sanity::memory::InMemoryContentStore;
use chefbook_storefront::state::AppState;
use tower::ServiceExt;

pub use chefbook_storefront::sanity::memory::fixtures;

/// Static assets shipped with the storefront crate.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static");

/// A storefront router over an in-memory store.
pub struct TestApp {
    router: Router,
    store: Arc<InMemoryContentStore>,
}

impl TestApp {
    #[must_use]
    pub fn new(store: InMemoryContentStore) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(store.clone());
        Self {
            router: build_router(state, Path::new(STATIC_DIR)),
            store,
        }
    }

    /// The backing store, for read-count assertions.
    #[must_use]
    pub fn store(&self) -> &InMemoryContentStore {
        &self.store
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// A fully buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Whether the response is a redirect to `target`.
    #[must_use]
    pub fn redirects_to(&self, target: &str) -> bool {
        self.status.is_redirection() && self.location() == Some(target)
    }
}
