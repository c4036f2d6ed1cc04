//! Cart management commands.
//!
//! The cart is persisted as `cart.json` inside `AURALOS_DATA_DIR`.
//!
//! # Usage
//!
//! ```bash
//! auralos cart add 16 --size 8 --quantity 2
//! auralos cart update 16 --size 8 --quantity 1
//! auralos cart remove 16 --size 8
//! auralos cart show
//! auralos cart clear
//! ```

use auralos_core::{Cart, FileStorage, Price, ProductId};

use super::{CommandError, load_index};
use crate::config::CliConfig;

/// A cart mutation or query.
#[derive(Debug, Clone)]
pub enum CartAction {
    Add {
        product_id: ProductId,
        size: String,
        quantity: u32,
    },
    Remove {
        product_id: ProductId,
        size: String,
    },
    Update {
        product_id: ProductId,
        size: String,
        quantity: i64,
    },
    Clear,
    Show,
}

/// Apply `action` to the persisted cart, then print the cart.
pub async fn run(config: &CliConfig, action: CartAction) -> Result<(), CommandError> {
    let index = load_index(config).await?;
    let storage = FileStorage::new(config.data_dir.clone());
    let mut cart = Cart::open(index, Box::new(storage)).with_policy(config.pricing);

    match action {
        CartAction::Add {
            product_id,
            size,
            quantity,
        } => {
            if !cart.add_item(product_id, &size, quantity) {
                return Err(CommandError::UnknownProduct(product_id));
            }
            tracing::info!(%product_id, %size, quantity, "Added to cart");
        }
        CartAction::Remove { product_id, size } => {
            cart.remove_item(product_id, &size);
            tracing::info!(%product_id, %size, "Removed from cart");
        }
        CartAction::Update {
            product_id,
            size,
            quantity,
        } => {
            cart.update_quantity(product_id, &size, quantity);
            tracing::info!(%product_id, %size, quantity, "Cart quantity updated");
        }
        CartAction::Clear => {
            cart.clear();
            tracing::info!("Cart cleared");
        }
        CartAction::Show => {}
    }

    print_cart(&cart);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    if cart.items().is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in cart.items() {
        match cart.index().get(item.product_id) {
            Some(product) => println!(
                "  {} x{} (size {}) {}",
                product.display_name(),
                item.quantity,
                item.size,
                Price::usd(product.price)
            ),
            None => println!(
                "  #{} x{} (size {}) no longer available",
                item.product_id, item.quantity, item.size
            ),
        }
    }

    let summary = cart.summary();
    println!("Items:    {}", summary.item_count);
    println!("Subtotal: {}", Price::usd(summary.subtotal));
    if !summary.discount.is_zero() {
        println!("Discount: {}", Price::usd(-summary.discount));
    }
    if summary.shipping.is_zero() {
        println!("Shipping: FREE");
    } else {
        println!("Shipping: {}", Price::usd(summary.shipping));
    }
    println!("Total:    {}", Price::usd(summary.total));
    if let Some(remaining) = summary.amount_to_free_shipping {
        println!("Add {} more for free shipping.", Price::usd(remaining));
    }
}
