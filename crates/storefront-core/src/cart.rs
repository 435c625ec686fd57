//! # Cart Reducer
//!
//! Pure state transitions for the cart slice.
//!
//! ## Entry Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Entry Lifecycle                                 │
//! │                                                                         │
//! │  ┌──────────┐  AddToCart  ┌──────────┐  AddToCart  ┌──────────┐        │
//! │  │  absent  │────────────►│ count=1  │────────────►│ count=n  │        │
//! │  └──────────┘             └──────────┘◄────────────└──────────┘        │
//! │       ▲                        │       RemoveFromCart                   │
//! │       │      RemoveFromCart    │                                        │
//! │       └────────────────────────┘                                        │
//! │                                                                         │
//! │  ClearCart: every entry → absent                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `reduce` never mutates its input. On error the caller keeps the cart it
//! passed in.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, CartState, Product, ProductId, ProductShortInfo};
use crate::validation::{validate_price, validate_product_id, validate_product_name};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// An event that changes the cart slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add one unit of a product.
    AddToCart {
        product_id: ProductId,
        name: String,
        price: Money,
    },

    /// Remove one unit of a product.
    RemoveFromCart { product_id: ProductId },

    /// Empty the cart.
    ClearCart,
}

impl CartAction {
    /// Add-to-cart action for a product shown on the detail page.
    pub fn add(product: &Product) -> Self {
        CartAction::AddToCart {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
        }
    }

    /// Add-to-cart action for a catalog listing entry.
    pub fn add_short(product: &ProductShortInfo) -> Self {
        CartAction::AddToCart {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
        }
    }
}

/// Computes the cart that results from applying `action` to `cart`.
///
/// ## Behavior
/// - `AddToCart`: inserts `{name, price, count: 1}` or increments the count
///   of an existing entry (name and price keep their first snapshot)
/// - `RemoveFromCart`: decrements; an entry reaching 0 is deleted; absent
///   ids are a no-op
/// - `ClearCart`: empty cart
///
/// ## Errors
/// - `CoreError::Validation` for a zero product id, blank name or negative price
/// - `CoreError::CartTooLarge` when a new entry would exceed `MAX_CART_ITEMS`
/// - `CoreError::QuantityTooLarge` when a count would exceed `MAX_ITEM_QUANTITY`
pub fn reduce(cart: &CartState, action: &CartAction) -> CoreResult<CartState> {
    match action {
        CartAction::AddToCart {
            product_id,
            name,
            price,
        } => add_item(cart, *product_id, name, *price),
        CartAction::RemoveFromCart { product_id } => remove_item(cart, *product_id),
        CartAction::ClearCart => Ok(CartState::new()),
    }
}

/// Adds one unit of a product.
pub fn add_item(
    cart: &CartState,
    product_id: ProductId,
    name: &str,
    price: Money,
) -> CoreResult<CartState> {
    validate_product_id(product_id)?;
    validate_product_name(name)?;
    validate_price(price)?;

    if let Some(item) = cart.get(product_id) {
        let new_count = item.count + 1;
        if new_count > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: new_count,
                max: MAX_ITEM_QUANTITY,
            });
        }
    } else if cart.item_count() >= MAX_CART_ITEMS {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }

    let mut next = cart.clone();
    next.items_mut()
        .entry(product_id)
        .and_modify(|item| item.count += 1)
        .or_insert_with(|| CartItem::new(name, price));
    Ok(next)
}

/// Removes one unit of a product. Absent products are a no-op.
pub fn remove_item(cart: &CartState, product_id: ProductId) -> CoreResult<CartState> {
    validate_product_id(product_id)?;

    let mut next = cart.clone();
    match cart.get(product_id).map(|item| item.count) {
        None => {}
        Some(1) => {
            next.items_mut().remove(&product_id);
        }
        Some(_) => {
            if let Some(item) = next.items_mut().get_mut(&product_id) {
                item.count -= 1;
            }
        }
    }
    Ok(next)
}

/// Takes the units of a placed order out of the cart.
///
/// Each entry loses the count it had in `submitted`; entries that reach 0
/// are deleted. Units added after the order was built stay in the cart.
pub fn remove_submitted(cart: &CartState, submitted: &CartState) -> CartState {
    let mut next = cart.clone();
    for (id, ordered) in submitted.iter() {
        match next.items_mut().get_mut(&id) {
            Some(item) if item.count > ordered.count => item.count -= ordered.count,
            Some(_) => {
                next.items_mut().remove(&id);
            }
            None => {}
        }
    }
    next
}
