//! Precomputed lookup tables over the catalog.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::{Catalog, ColorVocabulary, Product};
use crate::types::ProductId;

/// Normalized composite key: `lower(name) + " (" + lower(color) + ")"`.
#[must_use]
pub fn composite_key(name: &str, color: &str) -> String {
    format!("{} ({})", name.to_lowercase(), color.to_lowercase())
}

/// Lowercased fields of one product, kept alongside the product itself.
#[derive(Debug, Clone)]
pub(crate) struct NormalizedEntry {
    pub(crate) name: String,
    pub(crate) color: String,
}

/// Immutable lookup structures built once per catalog load.
///
/// Shared by reference (usually `Arc<CatalogIndex>`) between the reference
/// resolver and the cart. Rebuild it if the catalog changes.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    products: Vec<Product>,
    normalized: Vec<NormalizedEntry>,
    by_id: HashMap<ProductId, usize>,
    by_composite: HashMap<String, Vec<usize>>,
    by_base_name: HashMap<String, Vec<usize>>,
    colors: ColorVocabulary,
}

impl CatalogIndex {
    /// Index a catalog with the given color vocabulary.
    #[must_use]
    pub fn new(catalog: Catalog, colors: ColorVocabulary) -> Self {
        let products = catalog.into_products();
        let mut normalized = Vec::with_capacity(products.len());
        let mut by_id = HashMap::with_capacity(products.len());
        let mut by_composite: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_base_name: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, product) in products.iter().enumerate() {
            let name = product.name.to_lowercase();
            let color = product.color.to_lowercase();

            by_id.insert(product.id, position);
            by_composite
                .entry(composite_key(&product.name, &product.color))
                .or_default()
                .push(position);
            by_base_name
                .entry(name.clone())
                .or_default()
                .push(position);
            normalized.push(NormalizedEntry { name, color });
        }

        tracing::debug!(
            products = products.len(),
            base_names = by_base_name.len(),
            color_tokens = colors.tokens().len(),
            "Catalog index built"
        );

        Self {
            products,
            normalized,
            by_id,
            by_composite,
            by_base_name,
            colors,
        }
    }

    /// Index a catalog with the default color vocabulary.
    #[must_use]
    pub fn with_default_colors(catalog: Catalog) -> Self {
        Self::new(catalog, ColorVocabulary::default())
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The color vocabulary this index was built with.
    #[must_use]
    pub const fn colors(&self) -> &ColorVocabulary {
        &self.colors
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.by_id
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Catalog price of a product, if it exists.
    #[must_use]
    pub fn price_of(&self, id: ProductId) -> Option<Decimal> {
        self.get(id).map(|product| product.price)
    }

    /// Products whose normalized composite key equals `key`.
    ///
    /// `key` must already be lowercased (see [`composite_key`]).
    #[must_use]
    pub fn by_composite(&self, key: &str) -> Vec<&Product> {
        self.lookup(self.by_composite.get(key))
    }

    /// Products sharing the exact base name, in catalog order.
    #[must_use]
    pub fn products_named(&self, name: &str) -> Vec<&Product> {
        self.lookup(self.by_base_name.get(&name.trim().to_lowercase()))
    }

    /// Products paired with their lowercased name and color.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&Product, &NormalizedEntry)> {
        self.products.iter().zip(self.normalized.iter())
    }

    fn lookup(&self, positions: Option<&Vec<usize>>) -> Vec<&Product> {
        positions
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|&position| self.products.get(position))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn index() -> CatalogIndex {
        let catalog = Catalog::from_json(
            r#"[
                {"id": 1, "name": "Tinsla", "type": "Sneaker", "price": 90, "category": "womens", "subcategory": "sneakers", "color": "Black"},
                {"id": 2, "name": "Tinsla", "type": "Sneaker", "price": 95, "category": "womens", "subcategory": "sneakers", "color": "Bordo"},
                {"id": 3, "name": "Zappa", "type": "Ankle boot", "price": 180, "category": "mens", "subcategory": "boots", "color": "Black Gold Multi"}
            ]"#,
        )
        .unwrap();
        CatalogIndex::with_default_colors(catalog)
    }

    #[test]
    fn test_composite_key_lowercases() {
        assert_eq!(
            composite_key("Zappa", "Black Gold Multi"),
            "zappa (black gold multi)"
        );
    }

    #[test]
    fn test_lookup_by_id_and_price() {
        let index = index();
        assert_eq!(index.get(ProductId::new(2)).unwrap().color, "Bordo");
        assert_eq!(index.price_of(ProductId::new(3)), Some(Decimal::from(180)));
        assert_eq!(index.price_of(ProductId::new(99)), None);
        assert!(!index.contains(ProductId::new(99)));
    }

    #[test]
    fn test_lookup_by_composite() {
        let index = index();
        let found = index.by_composite("tinsla (bordo)");
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().unwrap().id, ProductId::new(2));
        assert!(index.by_composite("tinsla (green)").is_empty());
    }

    #[test]
    fn test_products_named_keeps_catalog_order() {
        let index = index();
        let ids: Vec<_> = index
            .products_named(" TINSLA ")
            .iter()
            .map(|p| p.id.as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
