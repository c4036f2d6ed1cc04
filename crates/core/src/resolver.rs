//! Strict resolution of free-text product references.
//!
//! The AI product finder names products as free text, usually in the
//! `"<Name> (<Color>)"` form it was shown. Its output is untrusted: names
//! come back with different casing, truncated, or describing products that
//! do not exist. [`ReferenceResolver`] maps each reference to exactly one
//! catalog entry or to [`ReconciliationResult::Unmatched`]. It never guesses.
//!
//! # Algorithm
//!
//! 1. Normalize the reference (trim, lowercase).
//! 2. Exact match against the composite `"name (color)"` key. A composite
//!    shared by more than one product is not an exact match.
//! 3. Without a recognized color token in the reference there is no safe way
//!    to disambiguate, so the result is `Unmatched`.
//! 4. The base name is the reference up to the first whitespace or `(`.
//! 5. Candidates are products whose name contains the base name.
//! 6. The first candidate, in catalog order, whose color label shares a
//!    color token with the reference is the match.

use std::sync::Arc;

use tracing::instrument;

use crate::catalog::{CatalogIndex, Product};

/// Outcome of resolving one reference.
///
/// `Unmatched` means "discard this candidate", never "pick something close".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ReconciliationResult<'a> {
    Matched(&'a Product),
    Unmatched,
}

impl<'a> ReconciliationResult<'a> {
    /// The matched product, if any.
    #[must_use]
    pub const fn product(self) -> Option<&'a Product> {
        match self {
            Self::Matched(product) => Some(product),
            Self::Unmatched => None,
        }
    }

    #[must_use]
    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Maps free-text product references to catalog entries.
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    index: Arc<CatalogIndex>,
}

impl ReferenceResolver {
    #[must_use]
    pub const fn new(index: Arc<CatalogIndex>) -> Self {
        Self { index }
    }

    /// The catalog index this resolver reads from.
    #[must_use]
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Resolve a reference such as `"Tinsla (Bordo)"`.
    ///
    /// A reference with no base name, such as `"(black)"`, is `Unmatched`
    /// even though every product name contains the empty string: a color
    /// alone never identifies a product.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve(&self, reference: &str) -> ReconciliationResult<'_> {
        let normalized = reference.trim().to_lowercase();
        if normalized.is_empty() {
            return ReconciliationResult::Unmatched;
        }

        if let [product] = self.index.by_composite(&normalized).as_slice() {
            tracing::debug!(product_id = %product.id, "Exact composite match");
            return ReconciliationResult::Matched(*product);
        }

        let tokens = self.index.colors().tokens_in(&normalized);
        if tokens.is_empty() {
            tracing::debug!("No color token in reference");
            return ReconciliationResult::Unmatched;
        }

        let base = base_name(&normalized);
        if base.is_empty() {
            return ReconciliationResult::Unmatched;
        }

        let matched = self
            .index
            .entries()
            .filter(|(_, entry)| entry.name.contains(base))
            .find(|(_, entry)| tokens.iter().any(|token| entry.color.contains(token)));

        match matched {
            Some((product, _)) => {
                tracing::debug!(product_id = %product.id, base, "Color-disambiguated match");
                ReconciliationResult::Matched(product)
            }
            None => {
                tracing::debug!(base, ?tokens, "No candidate shares a color token");
                ReconciliationResult::Unmatched
            }
        }
    }
}

/// Everything before the first whitespace or opening parenthesis.
fn base_name(normalized: &str) -> &str {
    normalized
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ColorVocabulary};
    use crate::types::ProductId;

    const CATALOG: &str = r#"[
        {"id": 1, "name": "Tinsla", "type": "Sneaker", "price": 110, "category": "womens", "subcategory": "sneakers", "color": "Black"},
        {"id": 2, "name": "Tinsla", "type": "Sneaker", "price": 110, "category": "womens", "subcategory": "sneakers", "color": "Bordo"},
        {"id": 3, "name": "Gilded", "type": "Clutch bag", "price": 65, "category": "womens", "subcategory": "bags", "color": "Black Gold Multi"},
        {"id": 4, "name": "Zeddyy", "type": "Chelsea boot", "price": 165, "category": "mens", "subcategory": "boots", "color": "Wheat"},
        {"id": 5, "name": "Twin", "type": "Loafer", "price": 100, "category": "mens", "subcategory": "dress", "color": "Black"},
        {"id": 6, "name": "Twin", "type": "Loafer", "price": 100, "category": "mens", "subcategory": "dress", "color": "Black"}
    ]"#;

    fn resolver() -> ReferenceResolver {
        let index = CatalogIndex::with_default_colors(Catalog::from_json(CATALOG).unwrap());
        ReferenceResolver::new(Arc::new(index))
    }

    fn resolved_id(resolver: &ReferenceResolver, reference: &str) -> Option<i64> {
        resolver
            .resolve(reference)
            .product()
            .map(|p| p.id.as_i64())
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let resolver = resolver();
        assert_eq!(resolved_id(&resolver, "tinsla (BORDO)"), Some(2));
        assert_eq!(resolved_id(&resolver, "  Zeddyy (Wheat)  "), Some(4));
    }

    #[test]
    fn test_exact_match_without_color_token() {
        // "wheat" is not a color token, so only the exact path can match it.
        let resolver = resolver();
        assert_eq!(resolved_id(&resolver, "Zeddyy (Wheat)"), Some(4));
        assert_eq!(resolved_id(&resolver, "Zeddyy Wheat"), None);
    }

    #[test]
    fn test_base_name_alone_is_unmatched() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("Tinsla"), ReconciliationResult::Unmatched);
    }

    #[test]
    fn test_color_disambiguates_shared_base_name() {
        let resolver = resolver();
        assert_eq!(resolved_id(&resolver, "Tinsla   (bordo)"), Some(2));
        assert_eq!(resolved_id(&resolver, "Tinsla in Bordo"), Some(2));
        assert_eq!(resolved_id(&resolver, "Tinsla sneaker (black)"), Some(1));
    }

    #[test]
    fn test_truncated_name_still_matches() {
        let resolver = resolver();
        assert_eq!(resolved_id(&resolver, "Tinsl (Bordo)"), Some(2));
    }

    #[test]
    fn test_partial_color_label() {
        let resolver = resolver();
        assert_eq!(resolved_id(&resolver, "Gilded (Gold)"), Some(3));
    }

    #[test]
    fn test_color_matching_no_candidate_is_unmatched() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("Tinsla (Navy)"), ReconciliationResult::Unmatched);
        assert_eq!(
            resolver.resolve("Completely Unknown Widget (Purple)"),
            ReconciliationResult::Unmatched
        );
        assert_eq!(
            resolver.resolve("Unknown Widget (Black)"),
            ReconciliationResult::Unmatched
        );
    }

    #[test]
    fn test_first_catalog_entry_wins_ties() {
        let resolver = resolver();
        assert_eq!(resolved_id(&resolver, "Tinsla (Black Bordo)"), Some(1));
    }

    #[test]
    fn test_duplicate_composite_falls_through_to_color_path() {
        let resolver = resolver();
        assert_eq!(resolved_id(&resolver, "Twin (Black)"), Some(5));
    }

    #[test]
    fn test_empty_and_punctuation_only_references() {
        let resolver = resolver();
        assert_eq!(resolver.resolve(""), ReconciliationResult::Unmatched);
        assert_eq!(resolver.resolve("   "), ReconciliationResult::Unmatched);
        assert_eq!(resolver.resolve("(black)"), ReconciliationResult::Unmatched);
    }

    #[test]
    fn test_injected_vocabulary_replaces_default() {
        let index = CatalogIndex::new(
            Catalog::from_json(CATALOG).unwrap(),
            ColorVocabulary::from_tokens(["wheat"]),
        );
        let resolver = ReferenceResolver::new(Arc::new(index));

        assert_eq!(resolved_id(&resolver, "Zeddyy Wheat"), Some(4));
        assert_eq!(resolver.resolve("Tinsla in Bordo"), ReconciliationResult::Unmatched);
    }

    #[test]
    fn test_every_product_resolves_to_itself() {
        let index = CatalogIndex::with_default_colors(Catalog::bundled().unwrap());
        let resolver = ReferenceResolver::new(Arc::new(index));

        for product in resolver.index().products() {
            let result = resolver.resolve(&product.display_name().to_uppercase());
            assert_eq!(
                result.product().map(|p| p.id),
                Some(product.id),
                "{}",
                product.display_name()
            );
        }
        assert!(!resolver.resolve("Tinsla").is_matched());
        assert_eq!(
            resolver.resolve("Tinsla (Bordo)").product().map(|p| p.id),
            Some(ProductId::new(16))
        );
    }
}
