//! Sanity content store client.
//!
//! # Architecture
//!
//! - GROQ queries over the Sanity HTTP query API, made with `reqwest`
//! - Sanity is source of truth - NO local sync, NO cache, every page render
//!   reads fresh documents
//! - Each query projects exactly the fields one page needs; raw documents
//!   are validated into typed records at this boundary
//! - Pages depend on the [`ContentStore`] trait, not on the HTTP client, so
//!   tests substitute an in-memory store
//!
//! # Absence
//!
//! Every read returns `Result<Record, ContentError>`. `ContentError::NotFound`
//! is the typed absence signal. Pages that treat any failure as "absent" use
//! [`ContentResultExt::or_absent`], which logs and reports the failure before
//! discarding it.
//!
//! # Example
//!
//! ```rust,ignore
//! use chefbook_storefront::sanity::{ContentResultExt, ContentStore, SanityClient};
//!
//! let client = SanityClient::new(&config.sanity)?;
//!
//! // Typed result: NotFound and transport failures stay distinguishable
//! let chef = client.chef(&chef_id).await?;
//!
//! // Uniform-failure policy: anything but a record becomes None
//! let maybe_chef = client.chef(&chef_id).await.or_absent();
//! ```

mod client;
mod conversions;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod queries;
pub mod types;

pub use client::SanityClient;
pub use types::*;

use async_trait::async_trait;
use chefbook_core::{ChefId, MenuItemId};
use thiserror::Error;

/// Errors that can occur when reading from the content store.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the content store.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The store rejected the query (bad GROQ, bad params, auth, outage).
    #[error("Query failed with status {status}: {message}")]
    Query {
        /// HTTP status code.
        status: u16,
        /// Error description from the store, or a truncated body.
        message: String,
    },

    /// The response was not a query envelope.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A document did not match the projected shape.
    #[error("Malformed {query} document: {source}")]
    Schema {
        /// Name of the query that produced the document.
        query: &'static str,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A document had the right shape but an impossible value.
    #[error("Invalid {field} in {query} document: {reason}")]
    Invalid {
        /// Name of the query that produced the document.
        query: &'static str,
        /// Offending field, as named in the projection.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The client could not be built from configuration.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// No document matched.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ContentError {
    /// Whether this error is the typed absence signal.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Collapse a content read into presence or absence.
pub trait ContentResultExt<T> {
    /// `Some(record)` on success, `None` on any error.
    ///
    /// `NotFound` is logged at debug level. Every other error is captured to
    /// Sentry and logged at error level, then treated as absent.
    fn or_absent(self) -> Option<T>;
}

impl<T> ContentResultExt<T> for Result<T, ContentError> {
    fn or_absent(self) -> Option<T> {
        match self {
            Ok(record) => Some(record),
            Err(ContentError::NotFound(what)) => {
                tracing::debug!(%what, "Content not found");
                None
            }
            Err(err) => {
                let event_id = sentry::capture_error(&err);
                tracing::error!(
                    error = %err,
                    sentry_event_id = %event_id,
                    "Error fetching content, treating as absent"
                );
                None
            }
        }
    }
}

/// Read access to chef and menu documents.
///
/// Implemented by [`SanityClient`] over HTTP and by the in-memory store used
/// in tests. Held by the application state as `Arc<dyn ContentStore>`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Full chef profile projection.
    async fn chef(&self, id: &ChefId) -> Result<Chef, ContentError>;

    /// Narrow chef projection used by checkout.
    async fn checkout_chef(&self, id: &ChefId) -> Result<CheckoutChef, ContentError>;

    /// IDs of every chef document, for route enumeration.
    async fn chef_ids(&self) -> Result<Vec<ChefId>, ContentError>;

    /// Listing projection of every chef document.
    async fn chefs(&self) -> Result<Vec<ChefSummary>, ContentError>;

    /// Every menu item.
    async fn menu_items(&self) -> Result<Vec<MenuItem>, ContentError>;

    /// A single menu item.
    async fn menu_item(&self, id: &MenuItemId) -> Result<MenuItem, ContentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_error_display() {
        let err = ContentError::NotFound("chef profile: chef-123".to_string());
        assert_eq!(err.to_string(), "Not found: chef profile: chef-123");

        let err = ContentError::Query {
            status: 400,
            message: "param $id referenced, but not provided".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Query failed with status 400: param $id referenced, but not provided"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = ContentError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_or_absent_passes_records_through() {
        let result: Result<u32, ContentError> = Ok(7);
        assert_eq!(result.or_absent(), Some(7));
    }

    #[test]
    fn test_or_absent_collapses_every_error() {
        let not_found: Result<u32, ContentError> = Err(ContentError::NotFound("x".into()));
        assert!(not_found.or_absent().is_none());

        let failed: Result<u32, ContentError> = Err(ContentError::Query {
            status: 503,
            message: "unavailable".into(),
        });
        assert!(failed.or_absent().is_none());
    }

    #[test]
    fn test_is_not_found() {
        assert!(ContentError::NotFound("x".into()).is_not_found());
        assert!(!ContentError::RateLimited(1).is_not_found());
    }
}
