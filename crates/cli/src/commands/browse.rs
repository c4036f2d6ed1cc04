//! Collection listings and quick search.
//!
//! # Usage
//!
//! ```bash
//! auralos browse --collection mens-boots --sort price-low
//! auralos search tinsla
//! ```

use auralos_core::catalog::{Collection, DEFAULT_SEARCH_LIMIT, SortOrder};
use auralos_core::{Price, Product};

use super::{CommandError, load_index};
use crate::config::CliConfig;

/// List a collection in the requested order.
#[allow(clippy::print_stdout)]
pub async fn run(
    config: &CliConfig,
    collection: Collection,
    sort: SortOrder,
) -> Result<(), CommandError> {
    let index = load_index(config).await?;
    let products = index.browse(collection, sort);

    println!("{collection} ({} products, sorted by {sort})", products.len());
    for product in products {
        print_product(product);
    }
    Ok(())
}

/// Print quick-search hits.
#[allow(clippy::print_stdout)]
pub async fn search(config: &CliConfig, query: &str, limit: Option<usize>) -> Result<(), CommandError> {
    let index = load_index(config).await?;
    let hits = index.search(query, limit.unwrap_or(DEFAULT_SEARCH_LIMIT));

    if hits.is_empty() {
        println!("No products found for {query:?}");
        return Ok(());
    }
    for product in hits {
        print_product(product);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_product(product: &Product) {
    let badge = product
        .badge
        .as_deref()
        .map(|badge| format!(" [{badge}]"))
        .unwrap_or_default();
    println!(
        "  #{:<3} {:<32} {:<16} {:>9}{badge}",
        product.id,
        product.display_name(),
        product.product_type,
        Price::usd(product.price).to_string()
    );
}
