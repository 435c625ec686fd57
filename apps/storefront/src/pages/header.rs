//! Navigation bar shown above every page.

use crate::state::AppState;
use crate::view::Node;

/// Renders the navigation bar. The cart link shows the number of distinct
/// products once the cart is not empty.
pub fn render(state: &AppState) -> Node {
    let count = state.cart.item_count();
    let cart_label = if count == 0 {
        "Cart".to_string()
    } else {
        format!("Cart ({})", count)
    };

    let links = [
        ("/catalog", "Catalog".to_string()),
        ("/delivery", "Delivery".to_string()),
        ("/contacts", "Contacts".to_string()),
        ("/cart", cart_label),
    ];

    Node::new("nav")
        .class("Application-Menu navbar navbar-expand-sm navbar-light bg-light")
        .child(
            Node::new("a")
                .class("Application-Brand navbar-brand")
                .attr("href", "/")
                .text("Example store"),
        )
        .child(Node::new("div").class("navbar-nav").children(
            links.into_iter().map(|(href, label)| {
                Node::new("a")
                    .class("nav-link")
                    .attr("href", href)
                    .text(label)
            }),
        ))
}
