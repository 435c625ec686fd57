//! # Storefront Application
//!
//! Store, commands and pages of the storefront, plus the entry point the
//! binary runs.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (wiring & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── AppState, AppAction, Store handle
//! │   ├── remote.rs   ◄─── Idle / Loading / Loaded / Failed slices
//! │   └── mount.rs    ◄─── Per-page liveness tokens
//! ├── commands/
//! │   ├── cart.rs     ◄─── add / remove / clear
//! │   ├── product.rs  ◄─── catalog and details fetch effects
//! │   └── checkout.rs ◄─── order submission
//! ├── pages/          ◄─── Catalog, Product, Cart, Header
//! ├── view.rs         ◄─── Queryable node tree + HTML
//! └── error.rs        ◄─── AppError for commands and pages
//! ```
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StorefrontConfig ──► HttpExampleApi ──┐                                │
//! │                                        ├──► Store::new(api, api, cart)  │
//! │                   ──► FileStore ──► CartStorage ──┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod pages;
pub mod state;
pub mod view;

use std::path::PathBuf;
use std::sync::Arc;

use storefront_client::{CartStorage, FileStore, HttpExampleApi, StorefrontConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use error::AppResult;
use pages::{CartPage, CatalogPage, ProductPage, Route};
use state::Store;

/// Builds a store backed by the HTTP API and the file cart cache.
pub fn build_store(config: &StorefrontConfig) -> AppResult<Store> {
    let api = Arc::new(HttpExampleApi::from_settings(&config.api)?);

    let cart_dir = config.storage.resolve_cart_dir()?;
    info!(?cart_dir, "Cart cache directory determined");
    let cart_storage = CartStorage::with_key(
        Arc::new(FileStore::new(cart_dir)),
        config.storage.cart_key.clone(),
    );

    Ok(Store::new(api.clone(), api, cart_storage))
}

/// Runs the command-line renderer.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (EnvFilter, RUST_LOG overrides)                 │
/// │  2. Load config (defaults → storefront.toml → STOREFRONT_* env)        │
/// │  3. Build store (HTTP API + file cart cache, cart restored)            │
/// │  4. Mount the page for `path`, await its load effect                   │
/// │  5. Print header + page as HTML                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(path: &str, config_path: Option<PathBuf>) -> AppResult<String> {
    init_tracing();
    info!(path, "Starting storefront");

    let config = StorefrontConfig::load_or_default(config_path);
    let store = build_store(&config)?;

    let body = match Route::parse(path)? {
        Route::Catalog => {
            let page = CatalogPage::new(store.clone());
            if let Some(load) = page.load() {
                if let Err(e) = load.await {
                    error!(error = %e, "Catalog failed to load");
                }
            }
            page.render()
        }
        Route::Product(id) => {
            let page = ProductPage::new(store.clone(), id);
            if let Some(load) = page.load() {
                if let Err(e) = load.await {
                    error!(product_id = id, error = %e, "Product failed to load");
                }
            }
            page.render()
        }
        Route::Cart => CartPage::new(store.clone()).render(),
    };

    let header = pages::header::render(&store.state());
    Ok(format!("{}\n{}", header.to_html(), body.to_html()))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_client=trace` - Trace the HTTP client only
/// - Default: INFO, DEBUG for the storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    // Logs go to stderr; stdout carries the rendered HTML.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
