//! Integration tests for reference resolution against the bundled catalog.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use auralos_core::catalog::{Collection, SortOrder};
use auralos_core::{Catalog, CatalogIndex, ColorVocabulary, ReconciliationResult, ReferenceResolver};
use auralos_integration_tests::{bundled_resolver, index_from_json};

// =============================================================================
// Exactness
// =============================================================================

#[test]
fn test_every_product_resolves_case_insensitively() {
    let resolver = bundled_resolver().unwrap();

    for product in resolver.index().products() {
        let name = product.display_name();
        for reference in [name.clone(), name.to_lowercase(), name.to_uppercase()] {
            assert_eq!(
                resolver.resolve(&reference).product().map(|p| p.id),
                Some(product.id),
                "{reference} should resolve to #{}",
                product.id
            );
        }
    }
}

#[test]
fn test_unknown_product_is_unmatched() {
    let resolver = bundled_resolver().unwrap();
    assert_eq!(
        resolver.resolve("Completely Unknown Widget (Purple)"),
        ReconciliationResult::Unmatched
    );
}

#[test]
fn test_shared_base_name_needs_a_color() {
    let resolver = bundled_resolver().unwrap();
    let tinslas = resolver.index().products_named("tinsla");
    assert_eq!(tinslas.len(), 2, "bundled catalog lists Tinsla twice");
    let second = *tinslas.last().unwrap();

    assert_eq!(resolver.resolve("Tinsla"), ReconciliationResult::Unmatched);
    assert_eq!(
        resolver.resolve(&format!("Tinsla ({})", second.color)),
        ReconciliationResult::Matched(second)
    );
}

#[test]
fn test_loose_references_resolve_through_color_tokens() {
    let resolver = bundled_resolver().unwrap();
    let resolved = |reference: &str| resolver.resolve(reference).product().map(|p| p.id.as_i64());

    assert_eq!(resolved("Tinsla sneakers in bordo"), Some(16));
    assert_eq!(resolved("Gilded clutch, gold"), Some(17));
    assert_eq!(resolved("Braz cognac loafer"), Some(13));
    assert_eq!(resolved("Zappa (Navy)"), None);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_custom_vocabulary_and_catalog() {
    let catalog = Catalog::from_json(
        r#"[
            {"id": 10, "name": "Ridge", "type": "Hiking boot", "price": 140, "category": "mens", "subcategory": "boots", "color": "Moss"},
            {"id": 11, "name": "Ridge", "type": "Hiking boot", "price": 140, "category": "mens", "subcategory": "boots", "color": "Slate"}
        ]"#,
    )
    .unwrap();
    let index = CatalogIndex::new(catalog, ColorVocabulary::from_tokens(["moss", "slate"]));
    let resolver = ReferenceResolver::new(Arc::new(index));

    assert_eq!(
        resolver.resolve("ridge boot slate").product().map(|p| p.id.as_i64()),
        Some(11)
    );
    assert!(!resolver.resolve("Ridge (Black)").is_matched());
}

#[test]
fn test_invalid_catalog_is_rejected() {
    assert!(index_from_json("{}").is_err());
    assert!(
        index_from_json(
            r#"[
                {"id": 1, "name": "A", "type": "t", "price": 1, "category": "c", "subcategory": "s", "color": "Black"},
                {"id": 1, "name": "B", "type": "t", "price": 1, "category": "c", "subcategory": "s", "color": "Black"}
            ]"#
        )
        .is_err()
    );
}

// =============================================================================
// Browsing
// =============================================================================

#[test]
fn test_collections_partition_by_category() {
    let resolver = bundled_resolver().unwrap();
    let index = resolver.index();

    let womens = index.browse(Collection::Womens, SortOrder::Featured).len();
    let mens = index.browse(Collection::Mens, SortOrder::Featured).len();
    assert_eq!(womens + mens, index.len());

    let mens_boots = index.browse(Collection::MensBoots, SortOrder::PriceLow);
    let prices: Vec<_> = mens_boots.iter().map(|p| p.price).collect();
    let mut sorted = prices.clone();
    sorted.sort();
    assert_eq!(prices, sorted);
    assert!(mens_boots.iter().all(|p| p.category == "mens" && p.subcategory == "boots"));
}

#[test]
fn test_search_finds_resolvable_products() {
    let resolver = bundled_resolver().unwrap();
    let hits = resolver.index().search("tinsla", 10);
    assert_eq!(hits.len(), 2);
    for product in hits {
        assert!(resolver.resolve(&product.display_name()).is_matched());
    }
    assert!(resolver.index().search("t", 10).is_empty());
}
