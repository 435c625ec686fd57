//! Page scenarios against in-process API doubles.

use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use storefront::commands::cart::add_listing_to_cart;
use storefront::error::ErrorCode;
use storefront::pages::{header, CartPage, CatalogPage, ProductPage};
use storefront::state::{Remote, Store};
use storefront_client::{
    CartStorage, CartSubmitter, ClientError, ClientResult, KeyValueStore, MemoryStore,
    ProductFetcher, LOCAL_STORAGE_CART_KEY,
};
use storefront_core::{
    CartItem, CartState, CheckoutFormData, CheckoutResponse, Money, Product, ProductId,
    ProductShortInfo,
};
use tokio::sync::Notify;

// =============================================================================
// Test Doubles
// =============================================================================

#[derive(Default)]
struct StubApi {
    products: Vec<ProductShortInfo>,
    details: Vec<Product>,
    fail: bool,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl ProductFetcher for StubApi {
    async fn get_products(&self) -> ClientResult<Vec<ProductShortInfo>> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(ClientError::Transport("connection refused".into()));
        }
        Ok(self.products.clone())
    }

    async fn get_product_by_id(&self, id: ProductId) -> ClientResult<Product> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.details
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ClientError::not_found("Product", id))
    }
}

#[derive(Default)]
struct RecordingSubmitter {
    calls: Mutex<Vec<(CheckoutFormData, CartState)>>,
    fail: bool,
    gate: Option<Arc<Notify>>,
}

impl RecordingSubmitter {
    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CartSubmitter for RecordingSubmitter {
    async fn submit_checkout(
        &self,
        form: &CheckoutFormData,
        cart: &CartState,
    ) -> ClientResult<CheckoutResponse> {
        self.calls.lock().unwrap().push((form.clone(), cart.clone()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(ClientError::Status {
                status: 503,
                url: "http://localhost/checkout".into(),
            });
        }
        Ok(CheckoutResponse { id: 7 })
    }
}

/// Backend that reads the store from inside `set`, recording the cart size
/// it sees at each write.
#[derive(Default)]
struct ObservingStore {
    memory: MemoryStore,
    store: OnceLock<Store>,
    seen: Mutex<Vec<usize>>,
}

impl KeyValueStore for ObservingStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        self.memory.get(key)
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        if let Some(store) = self.store.get() {
            self.seen.lock().unwrap().push(store.state().cart.item_count());
        }
        self.memory.set(key, value)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.memory.remove(key)
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn catalog_data() -> Vec<ProductShortInfo> {
    vec![
        ProductShortInfo {
            id: 1,
            name: "Product 1".into(),
            price: Money::from_units(42),
        },
        ProductShortInfo {
            id: 2,
            name: "Product 2".into(),
            price: Money::from_units(42),
        },
    ]
}

fn test_product() -> Product {
    Product {
        id: 1,
        name: "Product 1".into(),
        price: Money::from_units(42),
        description: Some("very helpful in household".into()),
        material: Some("glass".into()),
        color: Some("transparent".into()),
    }
}

fn valid_form() -> CheckoutFormData {
    CheckoutFormData {
        name: "Jane Doe".into(),
        phone: "+1 (555) 123-4567".into(),
        address: "1 Main St".into(),
    }
}

fn store_with(api: StubApi, submitter: Arc<RecordingSubmitter>, storage: CartStorage) -> Store {
    Store::new(Arc::new(api), submitter, storage)
}

fn catalog_store() -> Store {
    store_with(
        StubApi {
            products: catalog_data(),
            details: vec![test_product()],
            ..Default::default()
        },
        Arc::new(RecordingSubmitter::default()),
        CartStorage::in_memory(),
    )
}

fn prepopulated_storage() -> (Arc<MemoryStore>, CartStorage) {
    let memory = Arc::new(MemoryStore::new());
    let cart = CartState::from_entries([
        (
            100,
            CartItem {
                name: "Product 124".into(),
                price: Money::from_units(4242),
                count: 2,
            },
        ),
        (
            200,
            CartItem {
                name: "Product 24242".into(),
                price: Money::from_units(1442424),
                count: 1,
            },
        ),
    ])
    .unwrap();
    let storage = CartStorage::new(memory.clone());
    storage.set_state(&cart).unwrap();
    (memory, storage)
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_catalog_shows_products_from_server() {
    let store = catalog_store();
    let page = CatalogPage::new(store);

    assert_eq!(page.render().find_by_class("Loading").unwrap().text_content(), "LOADING");

    page.load().unwrap().await.unwrap();
    let tree = page.render();

    for item in catalog_data() {
        let nodes = tree.find_all_by_test_id(item.id);
        assert_eq!(nodes.len(), 2);

        let container = nodes[0];
        let name = container.find_by_class("ProductItem-Name").unwrap();
        let price = container.find_by_class("ProductItem-Price").unwrap();
        let link = container.find_by_class("ProductItem-DetailsLink").unwrap();

        assert_eq!(name.text_content(), item.name);
        assert_eq!(price.text_content(), format!("${}", item.price.units()));
        assert_eq!(link.get_attr("href"), Some(format!("/catalog/{}", item.id).as_str()));
    }
}

#[tokio::test]
async fn test_catalog_marks_products_in_cart() {
    let store = catalog_store();
    let page = CatalogPage::new(store.clone());
    page.load().unwrap().await.unwrap();

    add_listing_to_cart(&store, &catalog_data()[1]).unwrap();

    let tree = page.render();
    assert!(tree.find_all_by_test_id(1)[0].find_by_class("CartBadge").is_none());
    let badge = tree.find_all_by_test_id(2)[0].find_by_class("CartBadge").unwrap();
    assert!(badge.has_class("text-success"));
    assert_eq!(badge.text_content(), "Item in cart");
}

#[tokio::test]
async fn test_catalog_fetch_failure_renders_error() {
    let store = store_with(
        StubApi {
            fail: true,
            ..Default::default()
        },
        Arc::new(RecordingSubmitter::default()),
        CartStorage::in_memory(),
    );
    let page = CatalogPage::new(store.clone());

    let err = page.load().unwrap().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::FetchError);
    assert!(matches!(store.state().products, Remote::Failed(_)));

    let tree = page.render();
    assert!(tree.find_by_class("Catalog-Error").is_some());
    assert!(tree.find_by_class("ProductItem").is_none());

    // A failed slice is fetched again on the next mount.
    assert!(CatalogPage::new(store).load().is_some());
}

#[tokio::test]
async fn test_loaded_catalog_is_not_refetched() {
    let store = catalog_store();
    CatalogPage::new(store.clone()).load().unwrap().await.unwrap();

    assert!(CatalogPage::new(store).load().is_none());
}

#[tokio::test]
async fn test_late_results_ignored_after_unmount() {
    let gate = Arc::new(Notify::new());
    let store = store_with(
        StubApi {
            products: catalog_data(),
            gate: Some(gate.clone()),
            ..Default::default()
        },
        Arc::new(RecordingSubmitter::default()),
        CartStorage::in_memory(),
    );

    let page = CatalogPage::new(store.clone());
    let task = tokio::spawn(page.load().unwrap());
    drop(page);
    gate.notify_one();

    task.await.unwrap().unwrap();
    assert_eq!(store.state().products, Remote::Loading);

    // Remounting issues the fetch again.
    let page = CatalogPage::new(store.clone());
    let load = page.load().unwrap();
    gate.notify_one();
    load.await.unwrap();
    assert_eq!(store.state().products.loaded().map(Vec::len), Some(2));
}

// =============================================================================
// Product
// =============================================================================

#[tokio::test]
async fn test_product_page_shows_details() {
    let page = ProductPage::new(catalog_store(), 1);
    page.load().unwrap().await.unwrap();
    let tree = page.render();

    let text = |class: &str| tree.find_by_class(class).unwrap().text_content();
    assert_eq!(text("ProductDetails-Name"), "Product 1");
    assert_eq!(text("ProductDetails-Description"), "very helpful in household");
    assert_eq!(text("ProductDetails-Price"), "$42");
    assert_eq!(text("ProductDetails-Color"), "transparent");
    assert_eq!(text("ProductDetails-Material"), "glass");
    assert_eq!(text("ProductDetails-AddToCart"), "Add to Cart");
}

#[tokio::test]
async fn test_add_to_cart_shows_success_indicator() {
    let store = catalog_store();
    let page = ProductPage::new(store.clone(), 1);
    page.load().unwrap().await.unwrap();

    assert!(store.state().cart.is_empty());
    assert!(page.render().find_by_class("text-success").is_none());

    page.click_add_to_cart().unwrap();

    assert!(page.render().find_by_class("text-success").is_some());
    let state = store.state();
    assert_eq!(state.cart.item_count(), 1);
    assert_eq!(
        state.cart.get(1),
        Some(&CartItem {
            name: "Product 1".into(),
            price: Money::from_units(42),
            count: 1,
        })
    );
}

#[tokio::test]
async fn test_add_to_cart_before_load_is_rejected() {
    let store = catalog_store();
    let page = ProductPage::new(store.clone(), 1);

    let err = page.click_add_to_cart().unwrap_err();
    assert_eq!(err.code, ErrorCode::NotLoaded);
    assert!(store.state().cart.is_empty());
}

#[tokio::test]
async fn test_missing_product_renders_not_found() {
    let store = catalog_store();
    let page = ProductPage::new(store, 99);

    let err = page.load().unwrap().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(
        page.render().find_by_class("Product-Error").unwrap().text_content(),
        "Product not found: 99"
    );
}

#[tokio::test]
async fn test_subscribers_see_each_snapshot() {
    let store = catalog_store();
    let mut updates = store.subscribe();

    add_listing_to_cart(&store, &catalog_data()[0]).unwrap();

    assert!(updates.has_changed().unwrap());
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(snapshot.cart.get(1).map(|i| i.count), Some(1));
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_shows_prepopulated_items() {
    let (_, storage) = prepopulated_storage();
    let store = store_with(
        StubApi::default(),
        Arc::new(RecordingSubmitter::default()),
        storage,
    );
    let tree = CartPage::new(store.clone()).render();

    let row = |id: ProductId| tree.find_all_by_test_id(id)[0];
    let cell = |id: ProductId, class: &str| row(id).find_by_class(class).unwrap().text_content();

    assert_eq!(cell(100, "Cart-Name"), "Product 124");
    assert_eq!(cell(100, "Cart-Price"), "$4242");
    assert_eq!(cell(100, "Cart-Count"), "2");
    assert_eq!(cell(100, "Cart-Total"), "$8484");
    assert_eq!(cell(200, "Cart-Name"), "Product 24242");
    assert_eq!(cell(200, "Cart-Price"), "$1442424");
    assert_eq!(cell(200, "Cart-Count"), "1");
    assert_eq!(
        tree.find_by_class("Cart-OrderPrice").unwrap().text_content(),
        "$1450908"
    );

    let nav = header::render(&store.state());
    assert!(nav.text_content().contains("Cart (2)"));
}

#[tokio::test]
async fn test_empty_cart_links_to_catalog() {
    let tree = CartPage::new(catalog_store()).render();

    let empty = tree.find_by_class("Cart-Empty").unwrap();
    assert!(empty.text_content().starts_with("Cart is empty"));
    assert!(tree.find_by_class("Cart-Table").is_none());
    assert!(tree.find_by_class("Cart-Clear").is_none());
}

#[tokio::test]
async fn test_cart_buttons() {
    let (_, storage) = prepopulated_storage();
    let store = store_with(
        StubApi::default(),
        Arc::new(RecordingSubmitter::default()),
        storage,
    );
    let page = CartPage::new(store.clone());

    let response = page.click_remove(100).unwrap();
    assert_eq!(response.lines[0].count, 1);
    let response = page.click_remove(999).unwrap();
    assert_eq!(response.totals.item_count, 2);

    page.click_clear().unwrap();
    assert!(store.state().cart.is_empty());
    assert!(page.render().find_by_class("Cart-Empty").is_some());
}

#[tokio::test]
async fn test_cart_persists_across_stores() {
    let memory = Arc::new(MemoryStore::new());
    let submitter = Arc::new(RecordingSubmitter::default());

    let first = store_with(
        StubApi::default(),
        submitter.clone(),
        CartStorage::new(memory.clone()),
    );
    add_listing_to_cart(&first, &catalog_data()[0]).unwrap();
    add_listing_to_cart(&first, &catalog_data()[0]).unwrap();

    let second = store_with(StubApi::default(), submitter, CartStorage::new(memory.clone()));
    assert_eq!(second.state().cart, first.state().cart);
    assert_eq!(second.state().cart.get(1).map(|i| i.count), Some(2));

    let raw = memory.get(LOCAL_STORAGE_CART_KEY).unwrap().unwrap();
    assert_eq!(raw, r#"{"1":{"name":"Product 1","price":42,"count":2}}"#);
}

#[tokio::test]
async fn test_cart_is_saved_outside_the_state_lock() {
    let backend = Arc::new(ObservingStore::default());
    let store = store_with(
        StubApi::default(),
        Arc::new(RecordingSubmitter::default()),
        CartStorage::new(backend.clone()),
    );
    assert!(backend.store.set(store.clone()).is_ok());

    add_listing_to_cart(&store, &catalog_data()[0]).unwrap();
    add_listing_to_cart(&store, &catalog_data()[1]).unwrap();
    CartPage::new(store.clone()).click_remove(1).unwrap();

    assert_eq!(*backend.seen.lock().unwrap(), vec![1, 2, 1]);
    let raw = backend.get(LOCAL_STORAGE_CART_KEY).unwrap().unwrap();
    assert_eq!(raw, r#"{"2":{"name":"Product 2","price":42,"count":1}}"#);
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let memory = Arc::new(MemoryStore::new());
    memory.set(LOCAL_STORAGE_CART_KEY, "[1, 2").unwrap();

    let store = store_with(
        StubApi::default(),
        Arc::new(RecordingSubmitter::default()),
        CartStorage::new(memory),
    );
    assert!(store.state().cart.is_empty());
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_invalid_form_keeps_cart_and_sends_nothing() {
    let (_, storage) = prepopulated_storage();
    let submitter = Arc::new(RecordingSubmitter::default());
    let store = store_with(StubApi::default(), submitter.clone(), storage);
    let page = CartPage::new(store.clone());
    let before = store.state().cart.clone();

    let form = CheckoutFormData {
        name: "Jane Doe".into(),
        phone: "call me".into(),
        address: String::new(),
    };
    let err = page.submit(form).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(submitter.call_count(), 0);
    assert_eq!(store.state().cart, before);

    let tree = page.render();
    let invalid = tree.find_all_by_class("is-invalid");
    assert_eq!(invalid.len(), 2);
    assert!(invalid[0].has_class("Form-Field_phone"));
    assert!(invalid[1].has_class("Form-Field_address"));
}

#[tokio::test]
async fn test_successful_checkout_clears_cart() {
    let (memory, storage) = prepopulated_storage();
    let submitter = Arc::new(RecordingSubmitter::default());
    let store = store_with(StubApi::default(), submitter.clone(), storage);
    let page = CartPage::new(store.clone());
    let submitted_cart = store.state().cart.clone();

    let order = page.submit(valid_form()).await.unwrap();
    assert_eq!(order.id, 7);

    {
        let calls = submitter.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, valid_form());
        assert_eq!(calls[0].1, submitted_cart);
    }

    let state = store.state();
    assert!(state.cart.is_empty());
    assert_eq!(state.latest_order.as_ref().map(|o| o.id), Some(7));
    assert_eq!(memory.get(LOCAL_STORAGE_CART_KEY).unwrap().as_deref(), Some("{}"));

    let tree = page.render();
    assert_eq!(tree.find_by_class("Cart-Number").unwrap().text_content(), "7");
    assert!(tree.find_by_class("Cart-Empty").is_some());
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart() {
    let (_, storage) = prepopulated_storage();
    let submitter = Arc::new(RecordingSubmitter {
        fail: true,
        ..Default::default()
    });
    let store = store_with(StubApi::default(), submitter.clone(), storage);
    let page = CartPage::new(store.clone());
    let before = store.state().cart.clone();

    let err = page.submit(valid_form()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::FetchError);
    assert_eq!(submitter.call_count(), 1);

    let state = store.state();
    assert_eq!(state.cart, before);
    assert!(state.latest_order.is_none());
    assert!(!state.checkout_pending);
    assert!(page.render().find_by_class("Cart-CheckoutError").is_some());
}

#[tokio::test]
async fn test_checkout_in_flight_blocks_resubmit_and_keeps_new_items() {
    let gate = Arc::new(Notify::new());
    let submitter = Arc::new(RecordingSubmitter {
        gate: Some(gate.clone()),
        ..Default::default()
    });
    let store = store_with(StubApi::default(), submitter.clone(), CartStorage::in_memory());
    let listing = catalog_data();
    add_listing_to_cart(&store, &listing[0]).unwrap();

    let page = CartPage::new(store.clone());
    let first = tokio::spawn(page.submit(valid_form()));
    while submitter.call_count() == 0 {
        tokio::task::yield_now().await;
    }
    assert!(store.state().checkout_pending);

    add_listing_to_cart(&store, &listing[1]).unwrap();
    let err = page.submit(valid_form()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CartError);
    assert_eq!(submitter.call_count(), 1);
    assert!(store.state().checkout_pending);

    gate.notify_one();
    let order = first.await.unwrap().unwrap();
    assert_eq!(order.id, 7);

    let state = store.state();
    assert!(!state.checkout_pending);
    assert!(!state.cart.contains(1));
    assert_eq!(state.cart.get(2).map(|item| item.count), Some(1));
    assert_eq!(submitter.calls.lock().unwrap()[0].1.ids().collect::<Vec<_>>(), vec![1]);
}

#[tokio::test]
async fn test_empty_cart_checkout_is_rejected() {
    let submitter = Arc::new(RecordingSubmitter::default());
    let store = store_with(StubApi::default(), submitter.clone(), CartStorage::in_memory());

    let err = CartPage::new(store.clone())
        .submit(valid_form())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::CartError);
    assert_eq!(submitter.call_count(), 0);
    assert!(store.state().checkout_error.is_some());
}
