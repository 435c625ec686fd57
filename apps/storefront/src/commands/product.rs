//! # Product Commands
//!
//! Fetch effects for the catalog and detail pages.
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  page mounts ──► ProductsRequested ──► api.get_products().await         │
//! │                                              │                          │
//! │                          ┌───────────────────┴──────────┐               │
//! │                   page still mounted?              page gone            │
//! │                          │                              │               │
//! │              ProductsLoaded / ProductsFailed       drop the result      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Effects take owned handles so they can be spawned onto the runtime.

use std::time::Instant;

use storefront_core::ProductId;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::state::{AppAction, MountWatch, Store};

/// Fetches the catalog listing into the products slice.
///
/// ## Returns
/// - `Ok(())` once the outcome is in the store, or was dropped because the
///   page unmounted
/// - `Err` with the fetch failure, which is also stored in the slice
pub async fn load_products(store: Store, mount: MountWatch) -> AppResult<()> {
    debug!(page = mount.page(), "load_products command");
    store.dispatch(AppAction::ProductsRequested)?;
    let started = Instant::now();

    let result = store.api().get_products().await;

    if !mount.is_mounted() {
        debug!(page = mount.page(), "Page unmounted, ignoring product list");
        return Ok(());
    }

    match result {
        Ok(products) => {
            info!(
                count = products.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Products loaded"
            );
            store.dispatch(AppAction::ProductsLoaded(products))?;
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "Failed to load products");
            let err = AppError::from(err);
            store.dispatch(AppAction::ProductsFailed(err.clone()))?;
            Err(err)
        }
    }
}

/// Fetches one product into the details slice.
pub async fn load_product_details(store: Store, id: ProductId, mount: MountWatch) -> AppResult<()> {
    debug!(product_id = id, page = mount.page(), "load_product_details command");
    store.dispatch(AppAction::ProductDetailsRequested(id))?;
    let started = Instant::now();

    let result = store.api().get_product_by_id(id).await;

    if !mount.is_mounted() {
        debug!(product_id = id, "Page unmounted, ignoring product details");
        return Ok(());
    }

    match result {
        Ok(product) => {
            info!(
                product_id = id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Product details loaded"
            );
            store.dispatch(AppAction::ProductDetailsLoaded(product))?;
            Ok(())
        }
        Err(err) => {
            warn!(product_id = id, error = %err, "Failed to load product details");
            let err = AppError::from(err);
            store.dispatch(AppAction::ProductDetailsFailed {
                id,
                error: err.clone(),
            })?;
            Err(err)
        }
    }
}
