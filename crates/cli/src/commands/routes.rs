//! Route enumeration commands.
//!
//! # Usage
//!
//! ```bash
//! chefbook-cli routes chefs
//! chefbook-cli routes chefs --json
//! ```
//!
//! # Environment Variables
//!
//! - `SANITY_PROJECT_ID` - Sanity project (required)
//! - `SANITY_DATASET`, `SANITY_API_VERSION`, `SANITY_USE_CDN`,
//!   `SANITY_API_HOST`, `SANITY_API_TOKEN` - see the storefront config
//!
//! Unlike the pages, enumeration has no absence fallback: a failed read
//! fails the command.

use std::io::{self, Write};

use chefbook_storefront::config::{ConfigError, SanityConfig};
use chefbook_storefront::routes::chefs::{ChefParams, chef_static_params};
use chefbook_storefront::sanity::{ContentError, SanityClient};
use thiserror::Error;

/// Errors from route enumeration.
#[derive(Debug, Error)]
pub enum RoutesError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content store error: {0}")]
    Content(#[from] ContentError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

/// Print every chef profile path.
pub async fn chefs(json: bool) -> Result<(), RoutesError> {
    dotenvy::dotenv().ok();

    let config = SanityConfig::from_env()?;
    let client = SanityClient::new(&config)?;

    tracing::info!(endpoint = %client.endpoint(), "Enumerating chef routes");
    let params = chef_static_params(&client).await?;
    tracing::info!(count = params.len(), "Chef routes enumerated");

    write_params(&mut io::stdout().lock(), &params, json)
}

fn write_params(out: &mut impl Write, params: &[ChefParams], json: bool) -> Result<(), RoutesError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, params)?;
        writeln!(out)?;
    } else {
        for param in params {
            writeln!(out, "{}", param.path())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chefbook_storefront::sanity::memory::InMemoryContentStore;
    use chefbook_storefront::sanity::memory::fixtures;

    use super::*;

    async fn params() -> Vec<ChefParams> {
        let store = InMemoryContentStore::new()
            .with_chef(fixtures::chef("chef-1", true, 45))
            .with_chef(fixtures::chef("chef-2", false, 60));
        chef_static_params(&store).await.unwrap()
    }

    #[tokio::test]
    async fn test_write_params_as_paths() {
        let mut out = Vec::new();
        write_params(&mut out, &params().await, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "/chefs/chef-1\n/chefs/chef-2\n");
    }

    #[tokio::test]
    async fn test_write_params_as_json() {
        let mut out = Vec::new();
        write_params(&mut out, &params().await, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "id": "chef-1" }, { "id": "chef-2" }])
        );
    }
}
