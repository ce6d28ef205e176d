//! End-to-end tests of the HTTP surface against a stub store driver.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::{Value, json};

use shopbridge_core::{
    FetchFilters, NewOrder, NewProduct, OperationResult, OrderRecord, ProductRecord,
};
use shopbridge_gateway::chat::ChatService;
use shopbridge_gateway::{AppState, routes};
use shopbridge_store::{BackendKind, FieldMap, Store, StoreDriver, StoreError};

struct StubDriver;

fn product(id: i64, name: &str, stock: i64) -> ProductRecord {
    ProductRecord {
        id,
        name: name.to_string(),
        price: Some(Decimal::new(1450, 2)),
        status: "publish".to_string(),
        stock_quantity: stock,
        categories: "Kitchen".to_string(),
        description: String::new(),
        image: None,
    }
}

#[async_trait::async_trait]
impl StoreDriver for StubDriver {
    async fn fetch_products(
        &self,
        _filters: &FetchFilters,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        Ok(vec![
            product(7, "Ceramic Mug", 8),
            product(8, "Tea Pot", 0),
        ])
    }

    async fn create_product(&self, input: &NewProduct) -> Result<OperationResult, StoreError> {
        Ok(OperationResult::completed(
            101,
            format!("Product '{}' created", input.name),
        ))
    }

    async fn update_product(
        &self,
        id: i64,
        _fields: &FieldMap,
    ) -> Result<OperationResult, StoreError> {
        if id == 999 {
            return Err(StoreError::NotFound(format!("product {id} not found")));
        }
        Ok(OperationResult::completed(id, "updated"))
    }

    async fn delete_product(&self, id: i64) -> Result<OperationResult, StoreError> {
        Ok(OperationResult::completed(id, "deleted"))
    }

    async fn fetch_orders(&self, _filters: &FetchFilters) -> Result<Vec<OrderRecord>, StoreError> {
        Ok(vec![OrderRecord {
            id: 50,
            status: "completed".to_string(),
            total: "29.00".to_string(),
            customer: "Ada".to_string(),
            date: "2024-03-01T10:00:00".to_string(),
            product_id: Some(7),
        }])
    }

    async fn create_order(&self, _input: &NewOrder) -> Result<OperationResult, StoreError> {
        Ok(OperationResult::completed(900, "Order created"))
    }

    async fn update_order_status(
        &self,
        id: i64,
        new_status: &str,
    ) -> Result<OperationResult, StoreError> {
        Ok(OperationResult::completed(
            id,
            format!("Order {id} is now {new_status}"),
        ))
    }

    async fn delete_order(&self, id: i64) -> Result<OperationResult, StoreError> {
        Ok(OperationResult::completed(id, "deleted"))
    }
}

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_gateway() -> String {
    let store = Store::with_driver(BackendKind::WooCommerce, Arc::new(StubDriver));
    let chat = ChatService::new(store.clone(), None, None);
    let app = routes::router(AppState::new(store, chat));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn list_products_returns_normalized_rows() {
    let base = spawn_gateway().await;
    let body: Value = reqwest::get(format!("{base}/api/products"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["name"], "Ceramic Mug");
    assert_eq!(body[0]["price"], "14.50");
}

#[tokio::test]
async fn create_product_returns_201_with_operation_result() {
    let base = spawn_gateway().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/products"))
        .json(&json!({"name": "Ceramic Mug", "price": "14.50"}))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["id"], 101);
}

#[tokio::test]
async fn create_product_with_blank_name_is_rejected() {
    let base = spawn_gateway().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/products"))
        .json(&json!({"name": "  ", "price": "14.50"}))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn update_of_missing_product_maps_to_404() {
    let base = spawn_gateway().await;
    let response = reqwest::Client::new()
        .put(format!("{base}/api/products/999"))
        .json(&json!({"regular_price": "9.99"}))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("json body");
    assert!(body["error"].as_str().is_some_and(|m| m.contains("999")));
}

#[tokio::test]
async fn create_order_rejects_non_positive_quantity() {
    let base = spawn_gateway().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "customer": "Ada",
            "product_id": 7,
            "quantity": 0,
            "total": "0.00"
        }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn best_seller_without_backend_support_maps_to_501() {
    // The stub keeps the default trait body, which reports unsupported.
    let base = spawn_gateway().await;
    let response = reqwest::get(format!("{base}/api/reports/best-seller"))
        .await
        .expect("request");

    assert_eq!(response.status(), 501);
}

#[tokio::test]
async fn out_of_stock_report_filters_depleted_products() {
    let base = spawn_gateway().await;
    let body: Value = reqwest::get(format!("{base}/api/reports/out-of-stock"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["name"], "Tea Pot");
}

#[tokio::test]
async fn last_order_report_returns_first_row() {
    let base = spawn_gateway().await;
    let body: Value = reqwest::get(format!("{base}/api/reports/last-order"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["id"], 50);
    assert_eq!(body["customer"], "Ada");
}

#[tokio::test]
async fn update_order_status_round_trips_the_message() {
    let base = spawn_gateway().await;
    let body: Value = reqwest::Client::new()
        .put(format!("{base}/api/orders/50/status"))
        .json(&json!({"status": "completed"}))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["message"], "Order 50 is now completed");
}

#[tokio::test]
async fn chat_command_executes_against_the_store() {
    let base = spawn_gateway().await;
    let body: Value = reqwest::Client::new()
        .post(format!("{base}/chat"))
        .json(&json!({"message": "list all products"}))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    let response = body["response"].as_str().expect("text reply");
    assert!(response.contains("Ceramic Mug"));
    assert!(response.contains("Tea Pot"));
}

#[tokio::test]
async fn chat_free_text_without_llm_gets_canned_reply() {
    let base = spawn_gateway().await;
    let body: Value = reqwest::Client::new()
        .post(format!("{base}/chat"))
        .json(&json!({"message": "tell me a joke"}))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    let response = body["response"].as_str().expect("text reply");
    assert!(response.contains("didn't understand"));
}
