//! HTTP client against a local axum server on an ephemeral port.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use storefront_client::{CartSubmitter, ClientError, HttpExampleApi, ProductFetcher};
use storefront_core::cart::{reduce, CartAction};
use storefront_core::{CartState, CheckoutFormData, Money};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Seen {
    checkouts: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn products() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Product 1", "price": 42},
        {"id": 2, "name": "Product 2", "price": 42}
    ]))
}

async fn product(Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    if id != 1 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "id": 1,
        "name": "Product 1",
        "price": 42,
        "description": "Really good product",
        "material": "Steel",
        "color": "Red"
    })))
}

async fn checkout(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let key = headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.checkouts.lock().unwrap().push((key, body));
    Json(json!({"id": 7}))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!([]))
}

async fn spawn_server(seen: Seen) -> SocketAddr {
    let app = Router::new()
        .route("/api/products", get(products))
        .route("/api/products/{id}", get(product))
        .route("/api/checkout", post(checkout))
        .route("/bad/products", get(|| async { "this is not json" }))
        .route(
            "/down/products",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/slow/products", get(slow))
        .with_state(seen);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    addr
}

fn client(addr: SocketAddr, prefix: &str) -> HttpExampleApi {
    HttpExampleApi::new(&format!("http://{}/{}", addr, prefix), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_get_products() {
    let addr = spawn_server(Seen::default()).await;
    let products = client(addr, "api").get_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[1].name, "Product 2");
    assert_eq!(products[1].price, Money::from_units(42));
}

#[tokio::test]
async fn test_get_product_by_id() {
    let addr = spawn_server(Seen::default()).await;
    let product = client(addr, "api").get_product_by_id(1).await.unwrap();

    assert_eq!(product.name, "Product 1");
    assert_eq!(product.description.as_deref(), Some("Really good product"));
    assert_eq!(product.material.as_deref(), Some("Steel"));
    assert_eq!(product.color.as_deref(), Some("Red"));
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let addr = spawn_server(Seen::default()).await;
    let err = client(addr, "api").get_product_by_id(99).await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound { ref id, .. } if id == "99"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let addr = spawn_server(Seen::default()).await;
    let err = client(addr, "down").get_products().await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode() {
    let addr = spawn_server(Seen::default()).await;
    let err = client(addr, "bad").get_products().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
    assert!(err.is_fetch_error());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let addr = spawn_server(Seen::default()).await;
    let api = HttpExampleApi::new(
        &format!("http://{}/slow", addr),
        Duration::from_millis(200),
    )
    .unwrap();

    let err = api.get_products().await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout(_)));
}

#[tokio::test]
async fn test_refused_connection_maps_to_transport() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, "api").get_products().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_checkout_posts_form_and_cart() {
    let seen = Seen::default();
    let addr = spawn_server(seen.clone()).await;

    let cart = reduce(
        &CartState::new(),
        &CartAction::AddToCart {
            product_id: 1,
            name: "Product 1".to_string(),
            price: Money::from_units(42),
        },
    )
    .unwrap();
    let form = CheckoutFormData {
        name: "Jane Doe".to_string(),
        phone: "+1 555 123 4567".to_string(),
        address: "1 Main St".to_string(),
    };

    let order = client(addr, "api").submit_checkout(&form, &cart).await.unwrap();
    assert_eq!(order.id, 7);

    let checkouts = seen.checkouts.lock().unwrap();
    assert_eq!(checkouts.len(), 1);
    let (key, body) = &checkouts[0];
    assert_eq!(key.as_ref().map(String::len), Some(36));
    assert_eq!(body["form"]["name"], "Jane Doe");
    assert_eq!(body["cart"]["1"]["count"], 1);
    assert_eq!(body["cart"]["1"]["price"], 42);
}
