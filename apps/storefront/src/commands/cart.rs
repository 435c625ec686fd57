//! # Cart Commands
//!
//! Cart manipulation on top of the store.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       checkout                           │
//! │                   remove_from_cart  (checkout.rs)                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CartAction, CartState, Money, Product, ProductId, ProductShortInfo};
use tracing::debug;

use crate::error::AppResult;
use crate::state::Store;

/// One row of the cart table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub count: u32,
    pub line_total: Money,
}

/// Cart totals for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products (the header's "Cart (N)")
    pub item_count: usize,
    pub total_quantity: u64,
    pub order_price: Money,
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&CartState> for CartResponse {
    fn from(cart: &CartState) -> Self {
        let lines = cart
            .iter()
            .map(|(product_id, item)| CartLine {
                product_id,
                name: item.name.clone(),
                price: item.price,
                count: item.count,
                line_total: item.line_total(),
            })
            .collect();

        CartResponse {
            lines,
            totals: CartTotals {
                item_count: cart.item_count(),
                total_quantity: cart.total_quantity(),
                order_price: cart.total(),
            },
        }
    }
}

/// Adds one unit of a product shown on the detail page.
///
/// ## Behavior
/// - Product already in cart: count increases by one
/// - Product not in cart: added with count 1
/// - Name and price are frozen at the first add
pub fn add_to_cart(store: &Store, product: &Product) -> AppResult<CartResponse> {
    debug!(product_id = product.id, "add_to_cart command");
    let state = store.dispatch(CartAction::add(product))?;
    Ok(CartResponse::from(&state.cart))
}

/// Adds one unit of a catalog listing entry.
pub fn add_listing_to_cart(store: &Store, product: &ProductShortInfo) -> AppResult<CartResponse> {
    debug!(product_id = product.id, "add_listing_to_cart command");
    let state = store.dispatch(CartAction::add_short(product))?;
    Ok(CartResponse::from(&state.cart))
}

/// Removes one unit of a product. Absent products are a no-op.
pub fn remove_from_cart(store: &Store, product_id: ProductId) -> AppResult<CartResponse> {
    debug!(product_id, "remove_from_cart command");
    let state = store.dispatch(CartAction::RemoveFromCart { product_id })?;
    Ok(CartResponse::from(&state.cart))
}

/// Clears all items from the cart.
pub fn clear_cart(store: &Store) -> AppResult<CartResponse> {
    debug!("clear_cart command");
    let state = store.dispatch(CartAction::ClearCart)?;
    Ok(CartResponse::from(&state.cart))
}
