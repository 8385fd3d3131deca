//! Sanity HTTP query API client.
//!
//! Uses `reqwest` for HTTP and `serde_json` for the response envelope.
//! Nothing is cached: every call is one remote read.

use std::sync::Arc;

use async_trait::async_trait;
use chefbook_core::{ChefId, MenuItemId};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::SanityConfig;

use super::conversions::{
    convert_checkout_chef, convert_chef, convert_chef_ids, convert_chef_summary,
    convert_menu_item, convert_menu_item_detail,
};
use super::queries::{
    CHEF_CHECKOUT, CHEF_IDS, CHEF_LIST, CHEF_PROFILE, ChefCheckoutDocument, ChefProfileDocument,
    IdDocument, MENU_ITEM, MENU_ITEMS, MenuItemDocument, Query,
};
use super::types::{Chef, CheckoutChef, ChefSummary, MenuItem};
use super::{ContentError, ContentStore};

/// Longest slice of a response body copied into logs and errors.
const BODY_PREVIEW_CHARS: usize = 500;

/// Envelope of a successful query response.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: serde_json::Value,
    /// Server-side execution time in milliseconds.
    #[serde(default)]
    ms: Option<u64>,
}

/// Envelope of a failed query response.
///
/// The query API reports `{"error": {"description": ...}}`; the gateway
/// reports `{"error": "...", "message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: serde_json::Value,
    #[serde(default)]
    message: Option<String>,
}

fn preview(body: &str, max: usize) -> String {
    body.chars().take(max).collect()
}

/// Best-effort human-readable message from an error body.
fn error_message(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) else {
        return preview(body, 200);
    };

    let description = parsed
        .error
        .get("description")
        .and_then(serde_json::Value::as_str)
        .map(String::from);

    description
        .or(parsed.message)
        .or_else(|| parsed.error.as_str().map(String::from))
        .unwrap_or_else(|| preview(body, 200))
}

/// Report a list element that could not be turned into a record.
fn report_skipped(query: Query, err: &ContentError) {
    let event_id = sentry::capture_error(err);
    tracing::warn!(
        query = query.name,
        error = %err,
        sentry_event_id = %event_id,
        "Skipping malformed document"
    );
}

// =============================================================================
// SanityClient
// =============================================================================

/// Client for the Sanity query API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

struct SanityClientInner {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<SecretString>,
}

impl SanityClient {
    /// Create a new query API client.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Config` if the query host cannot be derived or
    /// the HTTP client cannot be built.
    pub fn new(config: &SanityConfig) -> Result<Self, ContentError> {
        let base = config
            .base_url()
            .map_err(|e| ContentError::Config(e.to_string()))?;
        let endpoint = base
            .join(&format!(
                "v{}/data/query/{}",
                config.api_version, config.dataset
            ))
            .map_err(|e| ContentError::Config(e.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ContentError::Config(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(SanityClientInner {
                client,
                endpoint,
                token: config.token.clone(),
            }),
        })
    }

    /// Query endpoint, e.g. `https://abc.apicdn.sanity.io/v2024-01-01/data/query/production`.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Build the request URL: the GROQ source plus JSON-encoded `$name` params.
    fn query_url(&self, query: Query, params: &[(&str, &str)]) -> Result<Url, ContentError> {
        let mut url = self.inner.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query.groq);
            for (name, value) in params {
                pairs.append_pair(&format!("${name}"), &serde_json::to_string(value)?);
            }
            pairs.append_pair("perspective", "published");
        }
        Ok(url)
    }

    /// Execute a GROQ query and deserialize its `result`.
    ///
    /// Returns `Ok(None)` when the result is `null` (no matching document).
    async fn execute<T: DeserializeOwned>(
        &self,
        query: Query,
        params: &[(&str, &str)],
    ) -> Result<Option<T>, ContentError> {
        let url = self.query_url(query, params)?;

        let mut request = self.inner.client.get(url);
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ContentError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                query = query.name,
                body = %preview(&response_text, BODY_PREVIEW_CHARS),
                "Sanity query API returned non-success status"
            );
            return Err(ContentError::Query {
                status: status.as_u16(),
                message: error_message(&response_text),
            });
        }

        let envelope: QueryResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                query = query.name,
                body = %preview(&response_text, BODY_PREVIEW_CHARS),
                "Failed to parse Sanity query response"
            );
            ContentError::Parse(e)
        })?;

        debug!(query = query.name, ms = ?envelope.ms, "Sanity query completed");

        if envelope.result.is_null() {
            return Ok(None);
        }

        serde_json::from_value(envelope.result)
            .map(Some)
            .map_err(|source| ContentError::Schema {
                query: query.name,
                source,
            })
    }

    /// Execute a `[0]` query keyed by `$id`; a `null` result is `NotFound`.
    async fn fetch_one<T: DeserializeOwned>(
        &self,
        query: Query,
        id: &str,
    ) -> Result<T, ContentError> {
        self.execute(query, &[("id", id)])
            .await?
            .ok_or_else(|| ContentError::NotFound(format!("{}: {id}", query.name)))
    }

    /// Execute a list query; a `null` result is an empty list.
    ///
    /// One malformed element fails the whole read.
    async fn fetch_all<T: DeserializeOwned>(&self, query: Query) -> Result<Vec<T>, ContentError> {
        Ok(self.execute(query, &[]).await?.unwrap_or_default())
    }

    /// Execute a list query, validating each element on its own.
    ///
    /// Elements that fail deserialization or conversion are reported and
    /// skipped; the rest are returned in order.
    async fn fetch_each<D, R>(
        &self,
        query: Query,
        convert: impl Fn(D) -> Result<R, ContentError>,
    ) -> Result<Vec<R>, ContentError>
    where
        D: DeserializeOwned,
    {
        let values: Vec<serde_json::Value> = self.fetch_all(query).await?;
        let total = values.len();

        let records: Vec<R> = values
            .into_iter()
            .filter_map(|value| {
                serde_json::from_value::<D>(value)
                    .map_err(|source| ContentError::Schema {
                        query: query.name,
                        source,
                    })
                    .and_then(&convert)
                    .inspect_err(|err| report_skipped(query, err))
                    .ok()
            })
            .collect();

        if records.len() < total {
            debug!(
                query = query.name,
                kept = records.len(),
                skipped = total - records.len(),
                "Dropped malformed documents from list"
            );
        }
        Ok(records)
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    #[instrument(skip(self), fields(id = %id))]
    async fn chef(&self, id: &ChefId) -> Result<Chef, ContentError> {
        let doc: ChefProfileDocument = self.fetch_one(CHEF_PROFILE, id.as_str()).await?;
        convert_chef(doc)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn checkout_chef(&self, id: &ChefId) -> Result<CheckoutChef, ContentError> {
        let doc: ChefCheckoutDocument = self.fetch_one(CHEF_CHECKOUT, id.as_str()).await?;
        convert_checkout_chef(doc)
    }

    #[instrument(skip(self))]
    async fn chef_ids(&self) -> Result<Vec<ChefId>, ContentError> {
        let docs: Vec<IdDocument> = self.fetch_all(CHEF_IDS).await?;
        convert_chef_ids(docs)
    }

    #[instrument(skip(self))]
    async fn chefs(&self) -> Result<Vec<ChefSummary>, ContentError> {
        self.fetch_each(CHEF_LIST, convert_chef_summary).await
    }

    #[instrument(skip(self))]
    async fn menu_items(&self) -> Result<Vec<MenuItem>, ContentError> {
        self.fetch_each(MENU_ITEMS, |doc: MenuItemDocument| {
            convert_menu_item(MENU_ITEMS, doc)
        })
        .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn menu_item(&self, id: &MenuItemId) -> Result<MenuItem, ContentError> {
        let doc: MenuItemDocument = self.fetch_one(MENU_ITEM, id.as_str()).await?;
        convert_menu_item_detail(doc)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    const QUERY_PATH: &str = "/v2024-01-01/data/query/production";

    fn client_for(server: &MockServer, token: Option<&str>) -> SanityClient {
        let config = SanityConfig {
            project_id: "test".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: false,
            api_host: Some(Url::parse(&server.base_url()).unwrap()),
            token: token.map(SecretString::from),
            timeout: None,
        };
        SanityClient::new(&config).unwrap()
    }

    fn chef_id(raw: &str) -> ChefId {
        ChefId::parse(raw).unwrap()
    }

    #[test]
    fn test_endpoint_includes_version_and_dataset() {
        let config = SanityConfig {
            project_id: "abc123".to_string(),
            dataset: "staging".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            api_host: None,
            token: None,
            timeout: None,
        };
        let client = SanityClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/staging"
        );
    }

    #[test]
    fn test_error_message_variants() {
        assert_eq!(
            error_message(r#"{"error":{"description":"expected '}'","type":"queryParseError"}}"#),
            "expected '}'"
        );
        assert_eq!(
            error_message(r#"{"error":"Unauthorized","message":"Session not found"}"#),
            "Session not found"
        );
        assert_eq!(error_message("bad gateway"), "bad gateway");
    }

    #[tokio::test]
    async fn test_chef_sends_json_encoded_id_param() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(QUERY_PATH)
                    .query_param("$id", "\"chef-1\"")
                    .query_param("query", CHEF_PROFILE.groq);
                then.status(200).json_body(json!({
                    "ms": 3,
                    "query": CHEF_PROFILE.groq,
                    "result": {
                        "_id": "chef-1",
                        "name": "Ana Ruiz",
                        "position": "Head Chef",
                        "experience": 12,
                        "specialty": "Basque",
                        "imageUrl": "https://cdn.sanity.io/images/test/production/ana.jpg",
                        "description": "Wood fire and seafood.",
                        "available": true
                    }
                }));
            })
            .await;

        let chef = client_for(&server, None).chef(&chef_id("chef-1")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(chef.name, "Ana Ruiz");
        assert_eq!(chef.position, "Head Chef");
        assert!(chef.available);
        assert_eq!(
            chef.image_url.as_deref(),
            Some("https://cdn.sanity.io/images/test/production/ana.jpg")
        );
    }

    #[tokio::test]
    async fn test_null_result_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(QUERY_PATH);
                then.status(200).json_body(json!({ "ms": 1, "result": null }));
            })
            .await;

        let err = client_for(&server, None)
            .chef(&chef_id("missing"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: chef profile: missing");
    }

    #[tokio::test]
    async fn test_malformed_document_is_schema_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(QUERY_PATH);
                then.status(200).json_body(json!({
                    "result": { "_id": "chef-1", "name": "Ana Ruiz" }
                }));
            })
            .await;

        let err = client_for(&server, None)
            .checkout_chef(&chef_id("chef-1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContentError::Schema {
                query: "chef checkout",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_query_error_uses_store_description() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(QUERY_PATH);
                then.status(400).json_body(json!({
                    "error": {
                        "description": "param $id referenced, but not provided",
                        "type": "queryParseError"
                    }
                }));
            })
            .await;

        let err = client_for(&server, None)
            .chef(&chef_id("chef-1"))
            .await
            .unwrap_err();

        match err {
            ContentError::Query { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "param $id referenced, but not provided");
            }
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited_reads_retry_after() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(QUERY_PATH);
                then.status(429).header("Retry-After", "30").body("slow down");
            })
            .await;

        let err = client_for(&server, None).chef_ids().await.unwrap_err();
        assert!(matches!(err, ContentError::RateLimited(30)));
    }

    #[tokio::test]
    async fn test_token_sent_as_bearer() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(QUERY_PATH)
                    .header("Authorization", "Bearer skTestReadToken");
                then.status(200).json_body(json!({ "result": [] }));
            })
            .await;

        let ids = client_for(&server, Some("skTestReadToken"))
            .chef_ids()
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_chef_ids_lists_every_chef() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(QUERY_PATH)
                    .query_param("query", CHEF_IDS.groq);
                then.status(200).json_body(json!({
                    "result": [{ "_id": "chef-1" }, { "_id": "chef-2" }]
                }));
            })
            .await;

        let ids = client_for(&server, None).chef_ids().await.unwrap();
        let ids: Vec<&str> = ids.iter().map(ChefId::as_str).collect();
        assert_eq!(ids, ["chef-1", "chef-2"]);
    }

    #[tokio::test]
    async fn test_menu_items_skip_malformed_documents() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(QUERY_PATH)
                    .query_param("query", MENU_ITEMS.groq);
                then.status(200).json_body(json!({
                    "result": [
                        {
                            "_id": "dish-1",
                            "name": "Paella",
                            "description": "Saffron rice.",
                            "image": null,
                            "calories": 640,
                            "priceRange": { "min": 18, "max": 32 }
                        },
                        {
                            "_id": "dish-2",
                            "name": "Tortilla",
                            "description": "Potato and egg.",
                            "priceRange": { "min": 9, "max": 12 }
                        },
                        {
                            "_id": "dish-3",
                            "name": "Flan",
                            "description": "Caramel custard.",
                            "calories": 320,
                            "priceRange": { "min": 40, "max": 20 }
                        }
                    ]
                }));
            })
            .await;

        let items = client_for(&server, None).menu_items().await.unwrap();

        assert_eq!(items.len(), 1);
        let paella = items.first().unwrap();
        assert_eq!(paella.name, "Paella");
        assert_eq!(paella.price_range.to_string(), "$18 - $32");
    }

    #[tokio::test]
    async fn test_chefs_skip_document_with_bad_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(QUERY_PATH)
                    .query_param("query", CHEF_LIST.groq);
                then.status(200).json_body(json!({
                    "result": [
                        { "_id": "bad id", "name": "Draft", "position": "Cook", "available": true },
                        { "_id": "chef-1", "name": "Ana Ruiz", "position": "Head Chef", "available": true }
                    ]
                }));
            })
            .await;

        let chefs = client_for(&server, None).chefs().await.unwrap();

        let ids: Vec<&str> = chefs.iter().map(|chef| chef.id.as_str()).collect();
        assert_eq!(ids, ["chef-1"]);
    }

    #[tokio::test]
    async fn test_chef_ids_stay_strict() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(QUERY_PATH)
                    .query_param("query", CHEF_IDS.groq);
                then.status(200).json_body(json!({
                    "result": [{ "_id": "chef-1" }, { "_id": "bad id" }]
                }));
            })
            .await;

        let err = client_for(&server, None).chef_ids().await.unwrap_err();
        assert!(matches!(err, ContentError::Invalid { field: "_id", .. }));
    }
}
