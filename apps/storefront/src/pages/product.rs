//! Product page: full details from `GET /products/{id}` and the
//! "Add to Cart" button.

use std::future::Future;

use storefront_core::{Product, ProductId};

use super::{cart_badge, error_block, loading};
use crate::commands::cart::{add_to_cart, CartResponse};
use crate::commands::product::load_product_details;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::state::{AppState, Mount, Remote, Store};
use crate::view::Node;

/// A mounted product page.
#[derive(Debug)]
pub struct ProductPage {
    store: Store,
    id: ProductId,
    mount: Mount,
}

impl ProductPage {
    pub fn new(store: Store, id: ProductId) -> Self {
        ProductPage {
            store,
            id,
            mount: Mount::new("product"),
        }
    }

    /// Effect to run after mounting. `None` when the details are already loaded.
    pub fn load(&self) -> Option<impl Future<Output = AppResult<()>> + Send + 'static> {
        let loaded = self
            .store
            .state()
            .product(self.id)
            .is_some_and(Remote::is_loaded);
        if loaded {
            return None;
        }
        Some(load_product_details(
            self.store.clone(),
            self.id,
            self.mount.watch(),
        ))
    }

    /// Handles a click on "Add to Cart".
    pub fn click_add_to_cart(&self) -> AppResult<CartResponse> {
        let state = self.store.state();
        let product = state
            .product(self.id)
            .and_then(Remote::loaded)
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::NotLoaded,
                    format!("Product {} is not loaded", self.id),
                )
            })?;
        add_to_cart(&self.store, product)
    }

    pub fn render(&self) -> Node {
        render(&self.store.state(), self.id)
    }
}

/// Renders the product page for a snapshot.
pub fn render(state: &AppState, id: ProductId) -> Node {
    let page = Node::new("div").class("Product");

    match state.product(id) {
        None | Some(Remote::Idle) | Some(Remote::Loading) => page.child(loading()),
        Some(Remote::Failed(err)) => page.child(error_block("Product-Error", err)),
        Some(Remote::Loaded(product)) => page.child(details(product, state.cart.contains(id))),
    }
}

fn details(product: &Product, in_cart: bool) -> Node {
    let field = |tag: &str, class: &str, value: &Option<String>| {
        Node::new(tag)
            .class(class)
            .text(value.clone().unwrap_or_default())
    };

    Node::new("div")
        .class("ProductDetails row")
        .child(
            Node::new("div")
                .class("col-12 col-sm-7 col-lg-6")
                .child(
                    Node::new("h1")
                        .class("ProductDetails-Name")
                        .text(product.name.as_str()),
                )
                .child(field("p", "ProductDetails-Description", &product.description))
                .child(
                    Node::new("p")
                        .class("ProductDetails-Price fs-3")
                        .text(product.price.to_string()),
                )
                .child(
                    Node::new("p").child(
                        Node::new("button")
                            .class("ProductDetails-AddToCart btn btn-primary btn-lg")
                            .text("Add to Cart"),
                    ),
                )
                .child(
                    Node::new("dl")
                        .child(Node::new("dt").text("Color"))
                        .child(field("dd", "ProductDetails-Color", &product.color))
                        .child(Node::new("dt").text("Material"))
                        .child(field("dd", "ProductDetails-Material", &product.material)),
                )
                .maybe_child(in_cart.then(cart_badge)),
        )
}
