//! Product catalog.
//!
//! The catalog is a static list of [`Product`] records loaded once at
//! startup, either from the dataset bundled into this crate or from a JSON
//! file supplied by the operator. [`CatalogIndex`] precomputes the lookup
//! tables used by the reference resolver and the cart.

mod browse;
mod colors;
mod index;

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

pub use browse::{
    Collection, DEFAULT_SEARCH_LIMIT, ParseCollectionError, ParseSortError, SortOrder,
};
pub use colors::ColorVocabulary;
pub use index::{CatalogIndex, composite_key};

/// Dataset compiled into the crate.
const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
    #[error("product {id} has a negative price ({price})")]
    NegativePrice { id: ProductId, price: Decimal },
}

/// A purchasable product.
///
/// `name` is not unique: the same style is listed once per color. The
/// composite `"<name> (<color>)"` returned by [`Product::display_name`] is
/// what free-text references are matched against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: Decimal,
    pub category: String,
    pub subcategory: String,
    pub color: String,
    /// Always at least `[color]` after loading.
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// The `"<name> (<color>)"` label shown to users and to the AI finder.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.color)
    }
}

/// A validated, ordered list of products.
///
/// Order is significant: it is the "featured" order for browsing and the
/// tie-break order for reference resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-parsed products.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an id, a name is blank, or a
    /// price is negative.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        let mut validated = Vec::with_capacity(products.len());

        for mut product in products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice {
                    id: product.id,
                    price: product.price,
                });
            }
            if product.colors.is_empty() {
                product.colors.push(product.color.clone());
            }
            validated.push(product);
        }

        Ok(Self {
            products: validated,
        })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The dataset bundled with the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file itself is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Products in catalog order.
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

    /// Consume the catalog and return its products.
    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert!(
            catalog
                .products()
                .iter()
                .all(|p| p.colors.first() == Some(&p.color))
        );
    }

    #[test]
    fn test_from_json_defaults_colors_and_optional_fields() {
        let catalog = Catalog::from_json(
            r#"[{"id": 1, "name": "Tinsla", "type": "Sneaker", "price": 98.99,
                 "category": "womens", "subcategory": "sneakers", "color": "Bordo"}]"#,
        )
        .unwrap();

        let product = catalog.products().first().unwrap();
        assert_eq!(product.colors, vec!["Bordo".to_string()]);
        assert_eq!(product.price, Decimal::new(9899, 2));
        assert_eq!(product.badge, None);
        assert_eq!(product.display_name(), "Tinsla (Bordo)");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::from_json(
            r#"[{"id": 1, "name": "A", "type": "t", "price": 1, "category": "c", "subcategory": "s", "color": "Black"},
                {"id": 1, "name": "B", "type": "t", "price": 1, "category": "c", "subcategory": "s", "color": "Black"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == ProductId::new(1)));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Catalog::from_json(
            r#"[{"id": 3, "name": "A", "type": "t", "price": -5, "category": "c", "subcategory": "s", "color": "Black"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::NegativePrice { .. }));
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = Catalog::from_json(
            r#"[{"id": 4, "name": "  ", "type": "t", "price": 5, "category": "c", "subcategory": "s", "color": "Black"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyName(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
