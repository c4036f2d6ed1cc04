//! Subcommand implementations.

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod finder;
pub mod resolve;

use std::sync::Arc;

use auralos_core::{Catalog, CatalogError, CatalogIndex, FinderError, ProductId};
use thiserror::Error;

use crate::config::CliConfig;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Finder response error: {0}")]
    Finder(#[from] FinderError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown product id: {0}")]
    UnknownProduct(ProductId),
}

/// Load the configured catalog and index it with the configured colors.
pub async fn load_index(config: &CliConfig) -> Result<Arc<CatalogIndex>, CommandError> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading catalog file");
            let json = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CommandError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
            Catalog::from_json(&json)?
        }
        None => Catalog::bundled()?,
    };

    Ok(Arc::new(CatalogIndex::new(catalog, config.colors.clone())))
}
