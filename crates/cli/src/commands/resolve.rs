//! Resolve free-text product references against the catalog.
//!
//! # Usage
//!
//! ```bash
//! auralos resolve "Tinsla (Bordo)" "Zappa black" "Tinsla"
//! ```

use auralos_core::{ReconciliationResult, ReferenceResolver};

use super::{CommandError, load_index};
use crate::config::CliConfig;

/// Print the outcome for each reference, one per line.
#[allow(clippy::print_stdout)]
pub async fn run(config: &CliConfig, references: &[String]) -> Result<(), CommandError> {
    let resolver = ReferenceResolver::new(load_index(config).await?);

    let mut matched = 0_usize;
    for reference in references {
        match resolver.resolve(reference) {
            ReconciliationResult::Matched(product) => {
                matched += 1;
                println!("{reference:?} -> #{} {}", product.id, product.display_name());
            }
            ReconciliationResult::Unmatched => println!("{reference:?} -> unmatched"),
        }
    }

    tracing::info!(references = references.len(), matched, "References resolved");
    Ok(())
}
