//! Reconcile an AI finder response with the catalog.
//!
//! # Usage
//!
//! ```bash
//! # From a saved agent reply
//! auralos finder reply.txt
//!
//! # From stdin, as JSON
//! cat reply.txt | auralos finder - --json
//! ```

use std::path::Path;

use auralos_core::finder::{parse_candidates, reconcile};
use auralos_core::{FinderResults, Price, ProductMatch, ReferenceResolver};
use tokio::io::AsyncReadExt;

use super::{CommandError, load_index};
use crate::config::CliConfig;

/// Read the agent reply from `source` (`-` for stdin) and print the results.
#[allow(clippy::print_stdout)]
pub async fn run(config: &CliConfig, source: &Path, json: bool) -> Result<(), CommandError> {
    let reply = read_source(source).await?;
    let resolver = ReferenceResolver::new(load_index(config).await?);

    let records = parse_candidates(&reply)?;
    let matches = reconcile(&resolver, &records);
    let results = FinderResults::build(
        matches,
        resolver.index(),
        config.fallback_count,
        &mut rand::rng(),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("Search {}", results.search_id);
    if results.is_fallback() {
        println!("No products matched. Suggestions (not matches):");
    } else {
        println!("{} matching products", results.total_matches);
    }
    for entry in &results.top_three {
        print_match(entry);
    }
    if !results.additional_results.is_empty() {
        println!("More results:");
        for entry in &results.additional_results {
            print_match(entry);
        }
    }
    Ok(())
}

async fn read_source(source: &Path) -> Result<String, CommandError> {
    let read_error = |source_err| CommandError::Read {
        path: source.display().to_string(),
        source: source_err,
    };

    if source == Path::new("-") {
        let mut reply = String::new();
        tokio::io::stdin()
            .read_to_string(&mut reply)
            .await
            .map_err(read_error)?;
        Ok(reply)
    } else {
        tokio::fs::read_to_string(source).await.map_err(read_error)
    }
}

#[allow(clippy::print_stdout)]
fn print_match(entry: &ProductMatch) {
    println!(
        "  [{:>3.0}] #{} {} {}",
        entry.match_score,
        entry.product.id,
        entry.product.display_name(),
        Price::usd(entry.product.price)
    );
    if !entry.reasoning.is_empty() {
        println!("        {}", entry.reasoning);
    }
    for pro in &entry.pros {
        println!("        + {pro}");
    }
    for con in &entry.cons {
        println!("        - {con}");
    }
}
