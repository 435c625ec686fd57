//! # Pages
//!
//! Each page is a pure `render(&AppState) -> Node` plus a small mounted
//! wrapper that owns a store handle and starts the page's effects.
//!
//! ## Routes
//! ```text
//! /catalog        → CatalogPage
//! /catalog/{id}   → ProductPage
//! /cart           → CartPage
//! ```

pub mod cart;
pub mod catalog;
pub mod header;
pub mod product;

pub use cart::CartPage;
pub use catalog::CatalogPage;
pub use product::ProductPage;

use storefront_core::validation::validate_product_id;
use storefront_core::ProductId;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::view::Node;

/// A page address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Catalog,
    Product(ProductId),
    Cart,
}

impl Route {
    /// Parses a path such as `/catalog/3`. `/` maps to the catalog.
    pub fn parse(path: &str) -> AppResult<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["catalog"] => Ok(Route::Catalog),
            ["cart"] => Ok(Route::Cart),
            ["catalog", id] => {
                let id: ProductId = id
                    .parse()
                    .map_err(|_| AppError::validation(format!("Invalid product id: {}", id)))?;
                validate_product_id(id)?;
                Ok(Route::Product(id))
            }
            _ => Err(AppError::new(
                ErrorCode::NotFound,
                format!("No page at {}", path),
            )),
        }
    }
}

// =============================================================================
// Shared Fragments
// =============================================================================

pub(crate) fn loading() -> Node {
    Node::new("div").class("Loading").text("LOADING")
}

pub(crate) fn error_block(class: &str, err: &AppError) -> Node {
    Node::new("div")
        .class(class)
        .class("alert alert-danger")
        .text(err.message.as_str())
}

pub(crate) fn cart_badge() -> Node {
    Node::new("p")
        .class("CartBadge text-success mx-3")
        .text("Item in cart")
}
