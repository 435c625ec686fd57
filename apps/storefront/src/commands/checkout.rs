//! # Checkout Command
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout                                             │
//! │                                                                         │
//! │  1. Validate form ──errors──► CheckoutFormRejected   (no request)      │
//! │  2. CheckoutStarted                                                    │
//! │        ├── pending ─► CHECKOUT IN PROGRESS  (no request)               │
//! │        └── empty ───► CheckoutFailed        (no request)               │
//! │  3. POST /checkout {form, cart at step 2}                              │
//! │        ├── ok ──► CheckoutCompleted  (ordered units leave the cart)    │
//! │        └── err ─► CheckoutFailed     (cart kept)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use storefront_core::validation::checkout_form_errors;
use storefront_core::{CheckoutFormData, CoreError, LatestOrder};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::state::{AppAction, Store};

/// Places an order for the current cart.
///
/// The submission is not tied to a page mount: an order the server
/// accepted is always recorded. Items added while the request is in
/// flight stay in the cart.
///
/// ## Errors
/// - `VALIDATION_ERROR` for the first invalid form field
/// - `CART_ERROR` when the cart is empty or another checkout is pending
/// - `FETCH_ERROR` / `NOT_FOUND` when the request fails
pub async fn checkout(store: Store, form: CheckoutFormData) -> AppResult<LatestOrder> {
    debug!("checkout command");

    let errors = checkout_form_errors(&form);
    if let Some(first) = errors.first().cloned() {
        debug!(count = errors.len(), "Checkout form rejected");
        store.dispatch(AppAction::CheckoutFormRejected(errors))?;
        return Err(first.into());
    }

    let cart = match store.dispatch(AppAction::CheckoutStarted) {
        Ok(started) => started.cart.clone(),
        Err(CoreError::EmptyCart) => {
            let err = AppError::from(CoreError::EmptyCart);
            store.dispatch(AppAction::CheckoutFailed(err.clone()))?;
            return Err(err);
        }
        Err(err) => {
            debug!(error = %err, "Checkout not started");
            return Err(err.into());
        }
    };

    match store.submitter().submit_checkout(&form, &cart).await {
        Ok(response) => {
            let order = LatestOrder {
                id: response.id,
                placed_at: Utc::now(),
            };
            info!(order_id = order.id, items = cart.item_count(), "Order placed");
            store.dispatch(AppAction::CheckoutCompleted {
                order: order.clone(),
                submitted: cart,
            })?;
            Ok(order)
        }
        Err(err) => {
            warn!(error = %err, "Checkout failed");
            let err = AppError::from(err);
            store.dispatch(AppAction::CheckoutFailed(err.clone()))?;
            Err(err)
        }
    }
}
