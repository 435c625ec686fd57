//! # Domain Types
//!
//! Wire and state types shared by the API client, the store and the pages.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌─────────────────┐   ┌──────────────────┐      │
//! │  │ ProductShortInfo │  │    Product      │   │    CartState     │      │
//! │  │  ─────────────   │  │  ─────────────  │   │  ─────────────   │      │
//! │  │  id              │  │  id, name       │   │  id → CartItem   │      │
//! │  │  name            │  │  price          │   │  (count ≥ 1)     │      │
//! │  │  price           │  │  description?   │   └──────────────────┘      │
//! │  └──────────────────┘  │  material?      │                             │
//! │   GET /products        │  color?         │   ┌──────────────────┐      │
//! │                        └─────────────────┘   │ CheckoutFormData │      │
//! │                         GET /products/{id}   │  name, phone,    │      │
//! │                                              │  address         │      │
//! │                                              └──────────────────┘      │
//! │                                               POST /checkout           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_cart_item;
use crate::MAX_CART_ITEMS;

/// Catalog identifier of a product. `0` is never a valid id.
pub type ProductId = u64;

// =============================================================================
// Products
// =============================================================================

/// A catalog entry as returned by `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductShortInfo {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
}

/// Full product details as returned by `GET /products/{id}`.
///
/// Immutable once fetched; the store keeps it in the details slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Product {
    /// Returns the catalog listing view of this product.
    pub fn short_info(&self) -> ProductShortInfo {
        ProductShortInfo {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A line in the cart.
///
/// Name and price are snapshots taken when the product was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub name: String,
    pub price: Money,
    pub count: u32,
}

impl CartItem {
    /// Creates the first unit of a product in the cart.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        CartItem {
            name: name.into(),
            price,
            count: 1,
        }
    }

    /// Calculates the line total (price × count).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_count(self.count)
    }
}

/// The cart slice: product id → cart item.
///
/// ## Invariants
/// - Keys are unique product ids, never `0`
/// - Every item has `1 <= count <= MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` entries
///
/// The map is only reachable read-only; new carts come from the reducer in
/// [`crate::cart`] or from [`CartState::from_entries`], which checks every
/// invariant. Deserialization goes through the same checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CartState(BTreeMap<ProductId, CartItem>);

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Builds a cart from prepared entries, rejecting any that break the
    /// cart invariants.
    pub fn from_entries<I>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (ProductId, CartItem)>,
    {
        let mut items = BTreeMap::new();
        for (id, item) in entries {
            validate_cart_item(id, &item)?;
            items.insert(id, item);
        }
        if items.len() > MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        Ok(CartState(items))
    }

    /// Returns the item for a product, if present.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.0.get(&id)
    }

    /// Checks whether a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains_key(&id)
    }

    /// Iterates entries in ascending product id order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductId, &CartItem)> {
        self.0.iter().map(|(id, item)| (*id, item))
    }

    /// Returns the product ids in the cart.
    pub fn ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.0.keys().copied()
    }

    /// Returns the number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.0.len()
    }

    /// Returns the total number of units across all products.
    pub fn total_quantity(&self) -> u64 {
        self.0.values().map(|i| i.count as u64).sum()
    }

    /// Calculates the order total.
    pub fn total(&self) -> Money {
        self.0.values().map(CartItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn items_mut(&mut self) -> &mut BTreeMap<ProductId, CartItem> {
        &mut self.0
    }
}

impl<'de> Deserialize<'de> for CartState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = BTreeMap::<ProductId, CartItem>::deserialize(deserializer)?;
        CartState::from_entries(items).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// The checkout form entered on the cart page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutFormData {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Body of `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub form: CheckoutFormData,
    pub cart: CartState,
}

/// Order confirmation returned by `POST /checkout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutResponse {
    pub id: u64,
}

/// The most recent successful order, shown on the cart page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestOrder {
    pub id: u64,
    pub placed_at: DateTime<Utc>,
}
