//! # storefront-client: I/O for the Storefront
//!
//! Everything that leaves the process: the HTTP API, the cart snapshot
//! cache and configuration loading.
//!
//! ## Modules
//!
//! - [`api`] - `ProductFetcher` / `CartSubmitter` traits and the reqwest client
//! - [`storage`] - Key-value backends and the cart snapshot cache
//! - [`config`] - Layered configuration (defaults, TOML, environment)
//! - [`error`] - Client error types

pub mod api;
pub mod config;
pub mod error;
pub mod storage;

pub use api::{CartSubmitter, HttpExampleApi, ProductFetcher};
pub use config::{ApiSettings, StorageSettings, StorefrontConfig};
pub use error::{ClientError, ClientResult};
pub use storage::{CartStorage, FileStore, KeyValueStore, MemoryStore, LOCAL_STORAGE_CART_KEY};
