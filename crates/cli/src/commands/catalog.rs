//! Catalog maintenance commands.
//!
//! # Usage
//!
//! ```bash
//! AURALOS_CATALOG_PATH=catalog.json auralos catalog check
//! ```

use auralos_core::ReferenceResolver;

use super::{CommandError, load_index};
use crate::config::CliConfig;

/// Validate the catalog and report products whose own display name does not
/// resolve back to them.
///
/// Such products can never be matched by the AI finder; they usually share
/// a name and color with another entry.
#[allow(clippy::print_stdout)]
pub async fn check(config: &CliConfig) -> Result<(), CommandError> {
    let resolver = ReferenceResolver::new(load_index(config).await?);
    let index = resolver.index();

    let unreachable: Vec<_> = index
        .products()
        .iter()
        .filter(|product| {
            resolver
                .resolve(&product.display_name())
                .product()
                .is_none_or(|resolved| resolved.id != product.id)
        })
        .collect();

    println!(
        "Catalog OK: {} products, {} color tokens",
        index.len(),
        index.colors().tokens().len()
    );

    if unreachable.is_empty() {
        println!("Every product resolves from its display name.");
    } else {
        tracing::warn!(count = unreachable.len(), "Products unreachable by reference");
        println!("Not reachable by display name:");
        for product in unreachable {
            println!("  #{} {}", product.id, product.display_name());
        }
    }
    Ok(())
}
