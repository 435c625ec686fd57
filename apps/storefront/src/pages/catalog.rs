//! Catalog page: one card per product from `GET /products`.

use std::future::Future;

use storefront_core::{CartState, ProductShortInfo};

use super::{cart_badge, error_block, loading};
use crate::commands::product::load_products;
use crate::error::AppResult;
use crate::state::{AppState, Mount, Remote, Store};
use crate::view::Node;

/// A mounted catalog page.
#[derive(Debug)]
pub struct CatalogPage {
    store: Store,
    mount: Mount,
}

impl CatalogPage {
    pub fn new(store: Store) -> Self {
        CatalogPage {
            store,
            mount: Mount::new("catalog"),
        }
    }

    /// Effect to run after mounting. `None` when the listing is already loaded.
    pub fn load(&self) -> Option<impl Future<Output = AppResult<()>> + Send + 'static> {
        if self.store.state().products.is_loaded() {
            return None;
        }
        Some(load_products(self.store.clone(), self.mount.watch()))
    }

    pub fn render(&self) -> Node {
        render(&self.store.state())
    }
}

/// Renders the catalog for a snapshot.
pub fn render(state: &AppState) -> Node {
    let page = Node::new("div")
        .class("Catalog")
        .child(Node::new("h1").text("Catalog"));

    match &state.products {
        Remote::Idle | Remote::Loading => page.child(loading()),
        Remote::Failed(err) => page.child(error_block("Catalog-Error", err)),
        Remote::Loaded(products) => page.child(
            Node::new("div")
                .class("row")
                .children(products.iter().map(|p| product_card(p, &state.cart))),
        ),
    }
}

fn product_card(product: &ProductShortInfo, cart: &CartState) -> Node {
    let badge = cart.contains(product.id).then(cart_badge);

    Node::new("div")
        .class("col-12 col-sm-6 col-md-4 col-lg-3")
        .test_id(product.id)
        .child(
            Node::new("div")
                .class("ProductItem card w-100 mb-4")
                .test_id(product.id)
                .child(
                    Node::new("div")
                        .class("card-body")
                        .child(
                            Node::new("h5")
                                .class("ProductItem-Name card-title")
                                .text(product.name.as_str()),
                        )
                        .child(
                            Node::new("p")
                                .class("ProductItem-Price card-text")
                                .text(product.price.to_string()),
                        )
                        .maybe_child(badge)
                        .child(
                            Node::new("a")
                                .class("ProductItem-DetailsLink card-link")
                                .attr("href", format!("/catalog/{}", product.id))
                                .text("Details"),
                        ),
                ),
        )
}
