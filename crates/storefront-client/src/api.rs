//! # Storefront HTTP API
//!
//! Capability traits the store depends on and their reqwest implementation.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront API                                       │
//! │                                                                         │
//! │  GET  {base}/products        → [ProductShortInfo]                      │
//! │  GET  {base}/products/{id}   → Product          (404 → NotFound)       │
//! │  POST {base}/checkout        → CheckoutResponse                        │
//! │         body: {form, cart}                                              │
//! │         header: Idempotency-Key: <uuid v4>                              │
//! │                                                                         │
//! │  One attempt per call. Whether to try again is the caller's decision.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use storefront_core::{
    CartState, CheckoutFormData, CheckoutRequest, CheckoutResponse, Product, ProductId,
    ProductShortInfo,
};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};

/// Header carrying a per-submission key so the server can drop duplicates.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

// =============================================================================
// Capability Traits
// =============================================================================

/// Read access to the product catalog.
#[async_trait]
pub trait ProductFetcher: Send + Sync {
    /// Fetches the catalog listing.
    async fn get_products(&self) -> ClientResult<Vec<ProductShortInfo>>;

    /// Fetches one product with full details.
    async fn get_product_by_id(&self, id: ProductId) -> ClientResult<Product>;
}

/// Order submission.
#[async_trait]
pub trait CartSubmitter: Send + Sync {
    /// Places an order for the given cart.
    async fn submit_checkout(
        &self,
        form: &CheckoutFormData,
        cart: &CartState,
    ) -> ClientResult<CheckoutResponse>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// reqwest-backed client for the storefront API.
#[derive(Debug, Clone)]
pub struct HttpExampleApi {
    client: Client,
    base_url: String,
}

impl HttpExampleApi {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(HttpExampleApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from configuration.
    pub fn from_settings(settings: &ApiSettings) -> ClientResult<Self> {
        Self::new(&settings.base_url, settings.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps non-success statuses onto `ClientError::Status`.
    fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ClientError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}

#[async_trait]
impl ProductFetcher for HttpExampleApi {
    async fn get_products(&self) -> ClientResult<Vec<ProductShortInfo>> {
        let url = self.endpoint("/products");
        debug!(url = %url, "Fetching product list");
        let started = Instant::now();

        let response = self.client.get(&url).send().await?;
        let products: Vec<ProductShortInfo> = Self::check_status(response)?.json().await?;

        info!(
            count = products.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched product list"
        );
        Ok(products)
    }

    async fn get_product_by_id(&self, id: ProductId) -> ClientResult<Product> {
        let url = self.endpoint(&format!("/products/{}", id));
        debug!(url = %url, product_id = id, "Fetching product");
        let started = Instant::now();

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            warn!(product_id = id, "Product not found");
            return Err(ClientError::not_found("Product", id));
        }
        let product: Product = Self::check_status(response)?.json().await?;

        info!(
            product_id = product.id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched product"
        );
        Ok(product)
    }
}

#[async_trait]
impl CartSubmitter for HttpExampleApi {
    async fn submit_checkout(
        &self,
        form: &CheckoutFormData,
        cart: &CartState,
    ) -> ClientResult<CheckoutResponse> {
        let url = self.endpoint("/checkout");
        let idempotency_key = Uuid::new_v4();
        debug!(
            url = %url,
            items = cart.item_count(),
            %idempotency_key,
            "Submitting checkout"
        );
        let started = Instant::now();

        let body = CheckoutRequest {
            form: form.clone(),
            cart: cart.clone(),
        };
        let response = self
            .client
            .post(&url)
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key.to_string())
            .json(&body)
            .send()
            .await?;
        let order: CheckoutResponse = Self::check_status(response)?.json().await?;

        info!(
            order_id = order.id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Checkout accepted"
        );
        Ok(order)
    }
}
