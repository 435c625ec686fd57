//! # Store
//!
//! Holds the application state and serializes every change to it.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Dispatch                                       │
//! │                                                                         │
//! │  dispatch(action)                                                       │
//! │       │  lock ──────────────────────────────────────────────┐           │
//! │       ▼                                                     │           │
//! │  reduce(&current, &action) ──err──► return CoreError        │ one at a  │
//! │       │ ok                          (state untouched)       │ time,     │
//! │       ▼                                                     │ FIFO      │
//! │  replace snapshot (Arc<AppState>) ──► watch subscribers     │           │
//! │       │  unlock ────────────────────────────────────────────┘           │
//! │       ▼                                                                 │
//! │  cart changed? ──yes──► persist latest cart (own lock)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  return new snapshot                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers always get a whole snapshot; nobody sees a half-applied action.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use storefront_client::{CartStorage, CartSubmitter, ProductFetcher};
use storefront_core::cart::{self, CartAction};
use storefront_core::{
    CartState, CoreError, CoreResult, LatestOrder, Product, ProductId, ProductShortInfo, ValidationError,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::remote::Remote;
use crate::error::AppError;

// =============================================================================
// State
// =============================================================================

/// One immutable snapshot of everything the pages show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Catalog listing.
    pub products: Remote<Vec<ProductShortInfo>>,

    /// Product details by id.
    pub details: BTreeMap<ProductId, Remote<Product>>,

    /// The cart slice.
    pub cart: CartState,

    /// Most recent successful order.
    pub latest_order: Option<LatestOrder>,

    /// Why the last checkout attempt failed.
    pub checkout_error: Option<AppError>,

    /// Per-field problems with the last submitted checkout form.
    pub form_errors: Vec<ValidationError>,

    /// A checkout request is in flight.
    pub checkout_pending: bool,
}

impl AppState {
    /// Returns the details slice for one product.
    pub fn product(&self, id: ProductId) -> Option<&Remote<Product>> {
        self.details.get(&id)
    }

    /// Returns the first form error for a field.
    pub fn form_error(&self, field: &str) -> Option<&ValidationError> {
        self.form_errors.iter().find(|e| e.field() == field)
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Everything that can change [`AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    ProductsRequested,
    ProductsLoaded(Vec<ProductShortInfo>),
    ProductsFailed(AppError),

    ProductDetailsRequested(ProductId),
    ProductDetailsLoaded(Product),
    ProductDetailsFailed { id: ProductId, error: AppError },

    Cart(CartAction),

    /// Rejected while another checkout is pending or the cart is empty.
    CheckoutStarted,
    CheckoutFormRejected(Vec<ValidationError>),
    /// `submitted` is the cart the order was placed for.
    CheckoutCompleted {
        order: LatestOrder,
        submitted: CartState,
    },
    CheckoutFailed(AppError),
}

impl From<CartAction> for AppAction {
    fn from(action: CartAction) -> Self {
        AppAction::Cart(action)
    }
}

/// Computes the state that results from applying `action` to `state`.
///
/// Cart actions fail with the cart reducer's error; `CheckoutStarted`
/// fails while a checkout is pending or the cart is empty. On error `state`
/// stays as it was.
pub fn reduce(state: &AppState, action: &AppAction) -> CoreResult<AppState> {
    let mut next = state.clone();
    match action {
        AppAction::ProductsRequested => next.products = Remote::Loading,
        AppAction::ProductsLoaded(products) => next.products = Remote::Loaded(products.clone()),
        AppAction::ProductsFailed(err) => next.products = Remote::Failed(err.clone()),

        AppAction::ProductDetailsRequested(id) => {
            next.details.insert(*id, Remote::Loading);
        }
        AppAction::ProductDetailsLoaded(product) => {
            next.details.insert(product.id, Remote::Loaded(product.clone()));
        }
        AppAction::ProductDetailsFailed { id, error } => {
            next.details.insert(*id, Remote::Failed(error.clone()));
        }

        AppAction::Cart(cart_action) => next.cart = cart::reduce(&state.cart, cart_action)?,

        AppAction::CheckoutStarted => {
            if state.checkout_pending {
                return Err(CoreError::CheckoutInProgress);
            }
            if state.cart.is_empty() {
                return Err(CoreError::EmptyCart);
            }
            next.checkout_pending = true;
            next.checkout_error = None;
            next.form_errors.clear();
        }
        AppAction::CheckoutFormRejected(errors) => {
            next.form_errors = errors.clone();
        }
        AppAction::CheckoutCompleted { order, submitted } => {
            next.checkout_pending = false;
            next.checkout_error = None;
            next.form_errors.clear();
            next.latest_order = Some(order.clone());
            next.cart = cart::remove_submitted(&state.cart, submitted);
        }
        AppAction::CheckoutFailed(err) => {
            next.checkout_pending = false;
            next.checkout_error = Some(err.clone());
        }
    }
    Ok(next)
}

// =============================================================================
// Store Handle
// =============================================================================

struct StoreInner {
    state: Mutex<Arc<AppState>>,
    updates: watch::Sender<Arc<AppState>>,
    api: Arc<dyn ProductFetcher>,
    submitter: Arc<dyn CartSubmitter>,
    cart_storage: CartStorage,
    /// Last cart written to `cart_storage`.
    saved_cart: Mutex<CartState>,
}

/// Cloneable handle to the application state.
///
/// ## Lifecycle
/// One store per process (or per test). Construction restores the cart
/// snapshot from `cart_storage`; every dispatch that changes the cart
/// writes it back after the state lock is released.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state())
            .field("cart_storage", &self.inner.cart_storage)
            .finish()
    }
}

impl Store {
    /// Creates a store with injected API and cart clients.
    pub fn new(
        api: Arc<dyn ProductFetcher>,
        submitter: Arc<dyn CartSubmitter>,
        cart_storage: CartStorage,
    ) -> Self {
        let cart = cart_storage.get_state();
        info!(
            items = cart.item_count(),
            key = cart_storage.key(),
            "Restored cart snapshot"
        );

        let initial = Arc::new(AppState {
            cart: cart.clone(),
            ..AppState::default()
        });
        let (updates, _) = watch::channel(initial.clone());

        Store {
            inner: Arc::new(StoreInner {
                state: Mutex::new(initial),
                updates,
                api,
                submitter,
                cart_storage,
                saved_cart: Mutex::new(cart),
            }),
        }
    }

    /// Returns the current snapshot.
    pub fn state(&self) -> Arc<AppState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribes to snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.inner.updates.subscribe()
    }

    /// Applies an action and publishes the resulting snapshot.
    ///
    /// ## Errors
    /// Cart precondition failures from the reducer. The snapshot is not
    /// replaced and subscribers are not notified.
    pub fn dispatch(&self, action: impl Into<AppAction>) -> CoreResult<Arc<AppState>> {
        let action = action.into();
        let (next, cart_changed) = {
            let mut current = self
                .inner
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            let next = match reduce(&current, &action) {
                Ok(next) => Arc::new(next),
                Err(err) => {
                    warn!(?action, error = %err, "Action rejected");
                    return Err(err);
                }
            };
            debug!(?action, "Action applied");

            let cart_changed = next.cart != current.cart;
            *current = next.clone();
            self.inner.updates.send_replace(next.clone());
            (next, cart_changed)
        };

        if cart_changed {
            self.persist_cart();
        }
        Ok(next)
    }

    /// Writes the latest published cart if it differs from the last one
    /// saved. Runs outside the state lock; the newest cart always wins.
    fn persist_cart(&self) {
        let mut saved = self
            .inner
            .saved_cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let latest = self.state();
        if latest.cart == *saved {
            return;
        }

        match self.inner.cart_storage.set_state(&latest.cart) {
            Ok(()) => *saved = latest.cart.clone(),
            Err(err) => warn!(error = %err, "Failed to save cart snapshot"),
        }
    }

    pub fn api(&self) -> &Arc<dyn ProductFetcher> {
        &self.inner.api
    }

    pub fn submitter(&self) -> &Arc<dyn CartSubmitter> {
        &self.inner.submitter
    }
}
