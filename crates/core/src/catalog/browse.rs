//! Collection listings and quick search over the catalog.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use super::{CatalogIndex, Product};

/// Number of products in the "new arrivals" collection.
const NEW_ARRIVALS_COUNT: usize = 8;

/// Shortest query the quick search will run.
const MIN_QUERY_LENGTH: usize = 2;

/// Default number of quick-search hits.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Error)]
#[error("unknown collection: {0}")]
pub struct ParseCollectionError(String);

#[derive(Debug, Error)]
#[error("unknown sort order: {0}")]
pub struct ParseSortError(String);

/// A storefront collection, addressed by URL slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collection {
    #[default]
    All,
    Womens,
    Mens,
    Boots,
    Heels,
    Bags,
    NewArrivals,
    WomensBoots,
    MensBoots,
}

impl Collection {
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Womens => "womens",
            Self::Mens => "mens",
            Self::Boots => "boots",
            Self::Heels => "heels",
            Self::Bags => "bags",
            Self::NewArrivals => "new-arrivals",
            Self::WomensBoots => "womens-boots",
            Self::MensBoots => "mens-boots",
        }
    }

    fn admits(self, product: &Product) -> bool {
        match self {
            Self::All | Self::NewArrivals => true,
            Self::Womens => product.category == "womens",
            Self::Mens => product.category == "mens",
            Self::Boots => product.subcategory == "boots",
            Self::Heels => product.subcategory == "heels",
            Self::Bags => product.subcategory == "bags",
            Self::WomensBoots => product.category == "womens" && product.subcategory == "boots",
            Self::MensBoots => product.category == "mens" && product.subcategory == "boots",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Collection {
    type Err = ParseCollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" | "" => Ok(Self::All),
            "womens" => Ok(Self::Womens),
            "mens" => Ok(Self::Mens),
            "boots" => Ok(Self::Boots),
            "heels" => Ok(Self::Heels),
            "bags" => Ok(Self::Bags),
            "new-arrivals" => Ok(Self::NewArrivals),
            "womens-boots" => Ok(Self::WomensBoots),
            "mens-boots" => Ok(Self::MensBoots),
            other => Err(ParseCollectionError(other.to_string())),
        }
    }
}

/// Listing order for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Reverse catalog order.
    Newest,
}

impl SortOrder {
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Newest => "newest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "featured" | "" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "newest" => Ok(Self::Newest),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}

impl CatalogIndex {
    /// Products in a collection, in the requested order.
    #[must_use]
    pub fn browse(&self, collection: Collection, sort: SortOrder) -> Vec<&Product> {
        let mut listed: Vec<&Product> = self
            .products()
            .iter()
            .filter(|product| collection.admits(product))
            .collect();

        if collection == Collection::NewArrivals {
            listed.truncate(NEW_ARRIVALS_COUNT);
        }

        match sort {
            SortOrder::Featured => {}
            SortOrder::PriceLow => listed.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHigh => listed.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Newest => listed.reverse(),
        }

        listed
    }

    /// Case-insensitive quick search on name, type, and category.
    ///
    /// Queries shorter than two characters return nothing.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LENGTH {
            return Vec::new();
        }

        self.products()
            .iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&query)
                    || product.product_type.to_lowercase().contains(&query)
                    || product.category.to_lowercase().contains(&query)
            })
            .take(limit)
            .collect()
    }
}
