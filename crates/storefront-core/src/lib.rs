//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate holds the storefront's domain types and the cart state machine
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Pages (apps/storefront)                      │   │
//! │  │    Catalog ──► Product ──► Cart ──► Checkout                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch(action)                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Store (apps/storefront)                      │   │
//! │  │    products, details, cart, latest order                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  reduce   │  │   rules   │  │   │
//! │  │   │ CartState │  │  totals   │  │CartAction │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              storefront-client (HTTP API, cart cache)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire and state types (Product, CartState, checkout)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart reducer
//! - [`error`] - Domain error types
//! - [`validation`] - Cart preconditions and checkout form rules
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::{reduce, CartAction};
//! use storefront_core::{CartState, Money};
//!
//! let add = CartAction::AddToCart {
//!     product_id: 1,
//!     name: "Product 1".to_string(),
//!     price: Money::from_units(42),
//! };
//!
//! let cart = reduce(&CartState::new(), &add).unwrap();
//! let cart = reduce(&cart, &add).unwrap();
//! assert_eq!(cart.get(1).unwrap().count, 2);
//! assert_eq!(cart.total().to_string(), "$84");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::CartAction;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct products allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum count of a single product in the cart.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Highest accepted unit price.
///
/// A full cart at this price still totals within `i64`.
pub const MAX_PRICE: i64 = i64::MAX / (MAX_CART_ITEMS as i64 * MAX_ITEM_QUANTITY as i64);
