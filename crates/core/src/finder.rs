//! AI product finder result aggregation.
//!
//! The hosted agent answers with a JSON array of candidates:
//!
//! ```json
//! [{"productName": "Tinsla (Bordo)", "score": 92, "reasoning": "...",
//!   "pros": ["..."], "cons": ["..."]}]
//! ```
//!
//! Each `productName` is resolved against the catalog exactly once.
//! Unresolved candidates are dropped. When nothing resolves, the results are
//! an explicitly labeled low-confidence fallback and report zero matches.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{CatalogIndex, Product};
use crate::resolver::ReferenceResolver;

/// Number of results shown in the headline row.
pub const TOP_RESULTS: usize = 3;

/// Reasoning attached to every fallback suggestion.
pub const FALLBACK_REASONING: &str =
    "No confident match was found for your search. This item is a suggestion from our catalog, not a match.";

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("agent response contains no JSON array")]
    NoJsonArray,
    #[error("agent response JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One candidate as returned by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub product_name: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

/// A candidate confirmed against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMatch {
    pub product: Product,
    pub match_score: f64,
    pub reasoning: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Whether results are genuine matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Matched,
    /// Nothing resolved; results are arbitrary catalog items.
    LowConfidenceFallback,
}

/// Extract the candidate array from an agent reply.
///
/// Agents tend to wrap JSON in prose or code fences, and the prose may
/// contain brackets of its own. Each `[` is tried in order and parsing stops
/// at the end of the first array, so trailing text is ignored. The first
/// non-empty candidate list wins; an empty list is returned only when no
/// other array parses.
///
/// # Errors
///
/// Returns an error if there is no `[` at all, or if no array parses (the
/// error from the first attempt is reported).
pub fn parse_candidates(text: &str) -> Result<Vec<CandidateRecord>, FinderError> {
    let mut empty = None;
    let mut first_error = None;

    for (start, _) in text.match_indices('[') {
        let Some(rest) = text.get(start..) else {
            continue;
        };
        let mut stream =
            serde_json::Deserializer::from_str(rest).into_iter::<Vec<CandidateRecord>>();
        match stream.next() {
            Some(Ok(records)) if !records.is_empty() => return Ok(records),
            Some(Ok(records)) => {
                empty.get_or_insert(records);
            }
            Some(Err(e)) => {
                first_error.get_or_insert(e);
            }
            None => {}
        }
    }

    match (empty, first_error) {
        (Some(records), _) => Ok(records),
        (None, Some(e)) => Err(FinderError::Malformed(e)),
        (None, None) => Err(FinderError::NoJsonArray),
    }
}

/// Resolve every candidate and keep the confirmed ones.
///
/// Score, reasoning, pros, and cons pass through unchanged. A product
/// confirmed by more than one candidate is kept once (the first candidate
/// wins). Results are ordered by score, highest first.
#[must_use]
pub fn reconcile(resolver: &ReferenceResolver, records: &[CandidateRecord]) -> Vec<ProductMatch> {
    let mut seen = HashSet::new();
    let mut matches: Vec<ProductMatch> = Vec::with_capacity(records.len());

    for record in records {
        let Some(product) = resolver.resolve(&record.product_name).product() else {
            tracing::info!(product_name = %record.product_name, "Dropping unresolved candidate");
            continue;
        };
        if !seen.insert(product.id) {
            continue;
        }
        matches.push(ProductMatch {
            product: product.clone(),
            match_score: record.score,
            reasoning: record.reasoning.clone(),
            pros: record.pros.clone(),
            cons: record.cons.clone(),
        });
    }

    matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    tracing::info!(
        candidates = records.len(),
        matched = matches.len(),
        "Finder candidates reconciled"
    );
    matches
}

/// Results ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinderResults {
    pub search_id: Uuid,
    pub confidence: Confidence,
    pub top_three: Vec<ProductMatch>,
    pub additional_results: Vec<ProductMatch>,
    /// Confirmed matches only; zero for a fallback.
    pub total_matches: usize,
}

impl FinderResults {
    /// Split confirmed matches for display, or fall back to `fallback_count`
    /// random catalog items labeled as low confidence when there are none.
    pub fn build<R>(
        matches: Vec<ProductMatch>,
        index: &CatalogIndex,
        fallback_count: usize,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        if matches.is_empty() {
            return Self::fallback(index, fallback_count, rng);
        }

        let total_matches = matches.len();
        let mut top_three = matches;
        let additional_results = top_three.split_off(total_matches.min(TOP_RESULTS));

        Self {
            search_id: Uuid::new_v4(),
            confidence: Confidence::Matched,
            top_three,
            additional_results,
            total_matches,
        }
    }

    fn fallback<R>(index: &CatalogIndex, count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut pool: Vec<&Product> = index.products().iter().collect();
        pool.shuffle(rng);
        pool.truncate(count);

        tracing::warn!(
            suggestions = pool.len(),
            "No finder candidate matched the catalog; showing low-confidence fallback"
        );

        let mut top_three: Vec<ProductMatch> = pool
            .into_iter()
            .map(|product| ProductMatch {
                product: product.clone(),
                match_score: 0.0,
                reasoning: FALLBACK_REASONING.to_string(),
                pros: Vec::new(),
                cons: Vec::new(),
            })
            .collect();
        let additional_results = top_three.split_off(top_three.len().min(TOP_RESULTS));

        Self {
            search_id: Uuid::new_v4(),
            confidence: Confidence::LowConfidenceFallback,
            top_three,
            additional_results,
            total_matches: 0,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.confidence == Confidence::LowConfidenceFallback
    }

    /// Confirmed matches in display order. Empty for a fallback.
    pub fn confirmed(&self) -> impl Iterator<Item = &ProductMatch> {
        let confirmed = !self.is_fallback();
        self.top_three
            .iter()
            .chain(self.additional_results.iter())
            .filter(move |_| confirmed)
    }
}
