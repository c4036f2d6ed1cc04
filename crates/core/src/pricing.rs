//! Cart pricing policy.
//!
//! Pure functions over line items and a price lookup:
//! - **Tiered discount**: "buy one, get one 40% off" across the whole cart.
//!   Every unit is ranked by unit price, most expensive first, and every
//!   second unit in that ranking is discounted. The cheaper unit of each
//!   pair is always the discounted one.
//! - **Shipping**: flat fee below a free-shipping threshold.
//!
//! The grand total is `subtotal - discount + shipping`.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartLineItem;
use crate::types::ProductId;

/// Policy knobs, defaulting to the storefront's current promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Fraction taken off every second unit (0.4 = 40%).
    pub discount_rate: Decimal,
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Decimal,
    /// Shipping fee charged below the threshold.
    pub flat_shipping_fee: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            discount_rate: Decimal::new(4, 1),
            free_shipping_threshold: Decimal::from(99),
            flat_shipping_fee: Decimal::from(10),
        }
    }
}

impl PricingPolicy {
    /// Tiered discount for these line items under this policy's rate.
    pub fn tiered_discount<F>(&self, items: &[CartLineItem], price_of: F) -> Decimal
    where
        F: Fn(ProductId) -> Option<Decimal>,
    {
        compute_tiered_discount(items, price_of, self.discount_rate)
    }

    #[must_use]
    pub fn shipping_fee(&self, subtotal: Decimal) -> Decimal {
        compute_shipping_fee(subtotal, self.free_shipping_threshold, self.flat_shipping_fee)
    }

    /// Price a set of line items end to end.
    pub fn summarize<F>(&self, items: &[CartLineItem], price_of: F) -> CartSummary
    where
        F: Fn(ProductId) -> Option<Decimal>,
    {
        let subtotal = compute_subtotal(items, &price_of);
        let discount = self.tiered_discount(items, &price_of);
        let shipping = self.shipping_fee(subtotal);
        let amount_to_free_shipping =
            (!shipping.is_zero()).then(|| self.free_shipping_threshold - subtotal);

        CartSummary {
            item_count: compute_item_count(items),
            subtotal,
            discount,
            shipping,
            total: compute_grand_total(subtotal, discount, shipping),
            amount_to_free_shipping,
        }
    }
}

/// Priced view of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Total units, not distinct line items.
    pub item_count: u64,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    /// How much more the customer must spend for free shipping, when
    /// shipping is being charged.
    pub amount_to_free_shipping: Option<Decimal>,
}

/// `Σ price × quantity`. Unknown products contribute nothing.
pub fn compute_subtotal<F>(items: &[CartLineItem], price_of: F) -> Decimal
where
    F: Fn(ProductId) -> Option<Decimal>,
{
    items
        .iter()
        .filter_map(|item| price_of(item.product_id).map(|price| price * Decimal::from(item.quantity)))
        .sum()
}

/// `Σ quantity` over all line items.
#[must_use]
pub fn compute_item_count(items: &[CartLineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// BOGO discount: every even-ranked unit (by descending unit price) earns
/// `rate × unit price`.
///
/// Units of one line item are contiguous in the ranking, so the number of
/// even positions a line covers is computed directly instead of expanding
/// every unit. Line items for unknown products take no position.
pub fn compute_tiered_discount<F>(items: &[CartLineItem], price_of: F, rate: Decimal) -> Decimal
where
    F: Fn(ProductId) -> Option<Decimal>,
{
    let mut priced: Vec<(Decimal, u64)> = items
        .iter()
        .filter_map(|item| price_of(item.product_id).map(|price| (price, u64::from(item.quantity))))
        .collect();
    priced.sort_by(|a, b| b.0.cmp(&a.0));

    let mut position: u64 = 0;
    let mut discount = Decimal::ZERO;
    for (price, quantity) in priced {
        let end = position + quantity;
        let even_positions = end / 2 - position / 2;
        discount += price * Decimal::from(even_positions) * rate;
        position = end;
    }
    discount
}

/// Flat fee below the threshold, free at or above it.
#[must_use]
pub fn compute_shipping_fee(subtotal: Decimal, free_threshold: Decimal, flat_fee: Decimal) -> Decimal {
    if subtotal >= free_threshold {
        Decimal::ZERO
    } else {
        flat_fee
    }
}

#[must_use]
pub fn compute_grand_total(subtotal: Decimal, discount: Decimal, shipping: Decimal) -> Decimal {
    subtotal - discount + shipping
}
