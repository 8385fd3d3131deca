//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::sanity::{ContentError, ContentStore, SanityClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The content store is an
/// explicit dependency: production wires in [`SanityClient`], tests wire in
/// an in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    content: Arc<dyn ContentStore>,
}

impl AppState {
    /// Create application state around any content store.
    #[must_use]
    pub fn new(content: Arc<dyn ContentStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { content }),
        }
    }

    /// Create application state backed by the Sanity query API.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Config` if the Sanity client cannot be built.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ContentError> {
        let client = SanityClient::new(&config.sanity)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Get a reference to the content store.
    #[must_use]
    pub fn content(&self) -> &dyn ContentStore {
        self.inner.content.as_ref()
    }
}
