//! Integration tests for the AURAlos commerce core.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p auralos-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `resolver_catalog` - Reference resolution against the bundled catalog
//! - `cart_pricing` - Cart mutations, persistence, and totals
//! - `finder_pipeline` - Agent reply to displayed results
//!
//! This crate only holds shared fixtures; the tests live in `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use auralos_core::{Catalog, CatalogError, CatalogIndex, ReferenceResolver};

/// Index over the bundled catalog with the default color vocabulary.
///
/// # Errors
///
/// Returns an error if the bundled catalog is invalid.
pub fn bundled_index() -> Result<Arc<CatalogIndex>, CatalogError> {
    Ok(Arc::new(CatalogIndex::with_default_colors(Catalog::bundled()?)))
}

/// Resolver over [`bundled_index`].
///
/// # Errors
///
/// Returns an error if the bundled catalog is invalid.
pub fn bundled_resolver() -> Result<ReferenceResolver, CatalogError> {
    Ok(ReferenceResolver::new(bundled_index()?))
}

/// Index over an inline JSON catalog.
///
/// # Errors
///
/// Returns an error if `json` is not a valid catalog.
pub fn index_from_json(json: &str) -> Result<Arc<CatalogIndex>, CatalogError> {
    Ok(Arc::new(CatalogIndex::with_default_colors(Catalog::from_json(json)?)))
}
