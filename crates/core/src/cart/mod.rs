//! Shopping cart.
//!
//! A cart is a list of line items, one per distinct (product, size) pair.
//! Every mutation writes the whole list to [`CartStorage`] under
//! [`CART_STORAGE_KEY`]; the list is read back when the cart is opened.
//! Persistence is best effort: failures are logged, never returned.

mod storage;

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogIndex;
use crate::pricing::{CartSummary, PricingPolicy, compute_item_count, compute_subtotal};
use crate::types::ProductId;

pub use storage::{
    CART_PAYLOAD_VERSION, CartStorage, FileStorage, MemoryStorage, StorageError, decode_items,
    encode_items,
};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// One (product, size) entry in the cart.
///
/// Serialized with the field names and epoch-millisecond timestamp used by
/// the storefront's client-side storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub size: String,
    /// Always at least 1.
    pub quantity: u32,
    /// Informational only; never used in pricing.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    fn is_for(&self, product_id: ProductId, size: &str) -> bool {
        self.product_id == product_id && self.size == size
    }
}

/// A shopping cart bound to a catalog and a storage backend.
pub struct Cart {
    index: Arc<CatalogIndex>,
    storage: Box<dyn CartStorage>,
    policy: PricingPolicy,
    items: Vec<CartLineItem>,
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Cart {
    /// Open the cart persisted in `storage`, or an empty one.
    ///
    /// Unreadable or unsupported payloads are discarded with a warning.
    #[must_use]
    pub fn open(index: Arc<CatalogIndex>, storage: Box<dyn CartStorage>) -> Self {
        let items = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(payload)) => decode_items(&payload).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart");
                Vec::new()
            }
        };

        tracing::debug!(items = items.len(), "Cart opened");

        Self {
            index,
            storage,
            policy: PricingPolicy::default(),
            items,
        }
    }

    /// Replace the pricing policy.
    #[must_use]
    pub fn with_policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    #[must_use]
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Add `quantity` units of a product in a size.
    ///
    /// Returns `false` if the product is not in the catalog. Adding to an
    /// existing (product, size) line increases its quantity; otherwise a new
    /// line is created. A new line holds at least one unit, so a requested
    /// quantity of zero creates a line of one but leaves an existing line
    /// unchanged.
    pub fn add_item(&mut self, product_id: ProductId, size: &str, quantity: u32) -> bool {
        if !self.index.contains(product_id) {
            tracing::debug!(%product_id, "Add to cart rejected: unknown product");
            return false;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.is_for(product_id, size)) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLineItem {
                product_id,
                size: size.to_string(),
                quantity: quantity.max(1),
                added_at: Utc::now().trunc_subsecs(3),
            });
        }

        self.persist();
        true
    }

    /// Remove a line item. No-op if it is not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId, size: &str) {
        self.items.retain(|item| !item.is_for(product_id, size));
        self.persist();
    }

    /// Set a line item's quantity, clamped to at least 1.
    ///
    /// No-op if the line item is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, size: &str, quantity: i64) {
        let clamped = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|item| item.is_for(product_id, size)) {
            item.quantity = clamped;
        }
        self.persist();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Subtotal before discount and shipping.
    #[must_use]
    pub fn total(&self) -> Decimal {
        compute_subtotal(&self.items, |id| self.index.price_of(id))
    }

    /// Total units in the cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        compute_item_count(&self.items)
    }

    /// BOGO tiered discount across the whole cart.
    #[must_use]
    pub fn discount(&self) -> Decimal {
        self.policy
            .tiered_discount(&self.items, |id| self.index.price_of(id))
    }

    #[must_use]
    pub fn shipping_fee(&self) -> Decimal {
        self.policy.shipping_fee(self.total())
    }

    /// `total - discount + shipping`.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.summary().total
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.policy
            .summarize(&self.items, |id| self.index.price_of(id))
    }

    fn persist(&self) {
        let result =
            encode_items(&self.items).and_then(|payload| self.storage.set(CART_STORAGE_KEY, &payload));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }
}
