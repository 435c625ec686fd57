//! Cart page: the cart table, order total, checkout form and the outcome
//! of the last checkout.

use std::future::Future;

use storefront_core::{CheckoutFormData, LatestOrder, ProductId};

use crate::commands::cart::{clear_cart, remove_from_cart, CartResponse};
use crate::commands::checkout::checkout;
use crate::error::AppResult;
use crate::state::{AppState, Store};
use crate::view::Node;

/// Form fields in display order: (field name, label, input type).
const FORM_FIELDS: &[(&str, &str, &str)] = &[
    ("name", "Name", "text"),
    ("phone", "Phone", "tel"),
    ("address", "Address", "text"),
];

/// A mounted cart page.
#[derive(Debug)]
pub struct CartPage {
    store: Store,
}

impl CartPage {
    pub fn new(store: Store) -> Self {
        CartPage { store }
    }

    /// Handles a click on "Clear shopping cart".
    pub fn click_clear(&self) -> AppResult<CartResponse> {
        clear_cart(&self.store)
    }

    /// Handles a click on a row's remove button.
    pub fn click_remove(&self, id: ProductId) -> AppResult<CartResponse> {
        remove_from_cart(&self.store, id)
    }

    /// Submits the checkout form.
    pub fn submit(
        &self,
        form: CheckoutFormData,
    ) -> impl Future<Output = AppResult<LatestOrder>> + Send + 'static {
        checkout(self.store.clone(), form)
    }

    pub fn render(&self) -> Node {
        render(&self.store.state())
    }
}

/// Renders the cart page for a snapshot.
pub fn render(state: &AppState) -> Node {
    let cart = CartResponse::from(&state.cart);

    let mut page = Node::new("div")
        .class("Cart")
        .child(Node::new("h1").text("Shopping cart"))
        .maybe_child(state.latest_order.as_ref().map(success_message));

    if cart.lines.is_empty() {
        page = page.child(
            Node::new("div")
                .class("Cart-Empty")
                .text("Cart is empty. Please select products in the ")
                .child(Node::new("a").attr("href", "/catalog").text("catalog")),
        );
    } else {
        page = page
            .child(cart_table(&cart))
            .child(
                Node::new("button")
                    .class("Cart-Clear btn btn-outline-secondary")
                    .text("Clear shopping cart"),
            )
            .child(checkout_form(state));
    }

    page.maybe_child(state.checkout_error.as_ref().map(|err| {
        Node::new("div")
            .class("Cart-CheckoutError alert alert-danger")
            .text(err.message.as_str())
    }))
}

fn success_message(order: &LatestOrder) -> Node {
    Node::new("div")
        .class("Cart-SuccessMessage alert alert-success")
        .child(Node::new("h4").class("alert-heading").text("Well done!"))
        .child(
            Node::new("p")
                .text("Order #")
                .child(
                    Node::new("strong")
                        .class("Cart-Number")
                        .text(order.id.to_string()),
                )
                .child(Node::new("span").text(" has been successfully completed.")),
        )
}

fn cart_table(cart: &CartResponse) -> Node {
    let header = Node::new("thead").child(Node::new("tr").children(
        ["#", "Product", "Price", "Count", "Total"]
            .into_iter()
            .map(|label| Node::new("th").text(label)),
    ));

    let rows = cart.lines.iter().enumerate().map(|(index, line)| {
        Node::new("tr")
            .test_id(line.product_id)
            .child(Node::new("th").class("Cart-Index").text((index + 1).to_string()))
            .child(Node::new("td").class("Cart-Name").text(line.name.as_str()))
            .child(Node::new("td").class("Cart-Price").text(line.price.to_string()))
            .child(Node::new("td").class("Cart-Count").text(line.count.to_string()))
            .child(Node::new("td").class("Cart-Total").text(line.line_total.to_string()))
    });

    let footer = Node::new("tfoot").child(
        Node::new("tr")
            .child(Node::new("td").attr("colspan", "4").text("Order price:"))
            .child(
                Node::new("td")
                    .class("Cart-OrderPrice")
                    .text(cart.totals.order_price.to_string()),
            ),
    );

    Node::new("table")
        .class("Cart-Table table")
        .child(header)
        .child(Node::new("tbody").children(rows))
        .child(footer)
}

fn checkout_form(state: &AppState) -> Node {
    let fields = FORM_FIELDS.iter().map(|(field, label, kind)| {
        let error = state.form_error(field);
        let class = match error {
            Some(_) => format!("Form-Field Form-Field_{} form-control is-invalid", field),
            None => format!("Form-Field Form-Field_{} form-control", field),
        };

        Node::new("div")
            .class("mb-3")
            .child(
                Node::new("label")
                    .attr("for", format!("f-{}", field))
                    .class("form-label")
                    .text(*label),
            )
            .child(
                Node::new("input")
                    .attr("id", format!("f-{}", field))
                    .attr("type", *kind)
                    .class(&class),
            )
            .maybe_child(error.map(|e| {
                Node::new("div")
                    .class("invalid-feedback")
                    .text(e.to_string())
            }))
    });

    let submit = Node::new("button")
        .class("Form-Submit btn btn-primary")
        .text(if state.checkout_pending {
            "Placing order..."
        } else {
            "Checkout"
        });

    Node::new("div")
        .class("Form")
        .child(Node::new("h2").text("Checkout"))
        .children(fields)
        .child(submit)
}
