//! Integration tests for `WooCommerceDriver` using wiremock HTTP mocks.

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopbridge_core::{FetchFilters, NewProduct};
use shopbridge_store::{StoreDriver, StoreError, WooCommerceDriver};

fn test_driver(base_url: &str) -> WooCommerceDriver {
    WooCommerceDriver::with_base_url(base_url, "ck_test", "cs_test")
        .expect("driver construction should not fail")
}

fn sample_product(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Ceramic Mug",
        "price": "14.50",
        "status": "publish",
        "stock_quantity": 8,
        "categories": [{"id": 1, "name": "Kitchen"}, {"id": 2, "name": "Gifts"}],
        "description": "A mug.",
        "images": [{"src": "https://cdn.example.com/mug.jpg"}, {"src": "https://cdn.example.com/mug2.jpg"}]
    })
}

#[tokio::test]
async fn fetch_products_empty_list_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let products = test_driver(&server.uri())
        .fetch_products(&FetchFilters::new())
        .await
        .expect("empty list should parse");
    assert!(products.is_empty());
}

#[tokio::test]
async fn fetch_products_maps_fields_and_defaults_per_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([sample_product(7)])))
        .mount(&server)
        .await;

    let products = test_driver(&server.uri())
        .fetch_products(&FetchFilters::new())
        .await
        .expect("should parse products");

    assert_eq!(products.len(), 1);
    let record = &products[0];
    assert_eq!(record.id, 7);
    assert_eq!(record.name, "Ceramic Mug");
    assert_eq!(record.price, Some(Decimal::new(1450, 2)));
    assert_eq!(record.status, "publish");
    assert_eq!(record.stock_quantity, 8);
    assert_eq!(record.categories, "Kitchen, Gifts");
    assert_eq!(record.image.as_deref(), Some("https://cdn.example.com/mug.jpg"));
}

#[tokio::test]
async fn fetch_products_honors_caller_per_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let params = FetchFilters::new().with("per_page", "5");
    test_driver(&server.uri())
        .fetch_products(&params)
        .await
        .expect("per_page should be forwarded");
}

#[tokio::test]
async fn create_product_applies_documented_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_partial_json(json!({
            "name": "Ceramic Mug",
            "type": "simple",
            "status": "publish",
            "manage_stock": true,
            "stock_quantity": 10,
            "categories": [{"id": 1}],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 101})))
        .expect(1)
        .mount(&server)
        .await;

    let input = NewProduct {
        name: "Ceramic Mug".to_string(),
        price: Decimal::new(1450, 2),
        description: "A mug.".to_string(),
    };
    let result = test_driver(&server.uri())
        .create_product(&input)
        .await
        .expect("create should succeed");
    assert_eq!(result.id, Some(101));
}

#[tokio::test]
async fn create_then_fetch_reflects_created_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(sample_product(101)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([sample_product(101)])))
        .mount(&server)
        .await;

    let driver = test_driver(&server.uri());
    let input = NewProduct {
        name: "Ceramic Mug".to_string(),
        price: Decimal::new(1450, 2),
        description: "A mug.".to_string(),
    };
    let created = driver.create_product(&input).await.expect("create");
    let products = driver
        .fetch_products(&FetchFilters::new())
        .await
        .expect("fetch");

    assert_eq!(products.len(), 1);
    assert_eq!(Some(products[0].id), created.id);
    assert_eq!(products[0].name, input.name);
    assert_eq!(products[0].price, Some(input.price));
}

#[tokio::test]
async fn update_product_is_idempotent_over_mapped_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/7"))
        .and(body_partial_json(json!({"regular_price": "9.99"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(2)
        .mount(&server)
        .await;

    let driver = test_driver(&server.uri());
    let mut fields = serde_json::Map::new();
    fields.insert("regular_price".to_string(), json!("9.99"));

    let first = driver.update_product(7, &fields).await.expect("first update");
    let second = driver
        .update_product(7, &fields)
        .await
        .expect("second update");
    assert_eq!(first, second);
    assert_eq!(first.id, Some(7));
}

#[tokio::test]
async fn update_of_missing_product_raises_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "woocommerce_rest_product_invalid_id"
        })))
        .mount(&server)
        .await;

    let err = test_driver(&server.uri())
        .update_product(999, &serde_json::Map::new())
        .await
        .expect_err("missing id must raise on update");
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn delete_product_maps_404_to_message_only_result() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/999"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "woocommerce_rest_product_invalid_id"
        })))
        .mount(&server)
        .await;

    let result = test_driver(&server.uri())
        .delete_product(999)
        .await
        .expect("missing id on delete is not an error");
    assert_eq!(result.id, None);
    assert!(result.message.contains("not found"));
}

#[tokio::test]
async fn delete_product_raises_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = test_driver(&server.uri())
        .delete_product(7)
        .await
        .expect_err("500 must raise");
    assert!(matches!(err, StoreError::Api { status: 500, .. }));
}

#[tokio::test]
async fn fetch_orders_maps_billing_name_and_guest_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 50,
                "status": "completed",
                "total": "29.00",
                "billing": {"first_name": "Ada"},
                "date_created": "2024-03-01T10:00:00",
                "line_items": [{"product_id": 7}]
            },
            {
                "id": 51,
                "status": "pending",
                "total": "5.00",
                "billing": {"first_name": ""},
                "date_created": "2024-03-02T10:00:00",
                "line_items": []
            }
        ])))
        .mount(&server)
        .await;

    let orders = test_driver(&server.uri())
        .fetch_orders(&FetchFilters::new())
        .await
        .expect("orders should parse");
    assert_eq!(orders[0].customer, "Ada");
    assert_eq!(orders[0].product_id, Some(7));
    assert_eq!(orders[1].customer, "Unknown");
    assert_eq!(orders[1].product_id, None);
}

#[tokio::test]
async fn best_seller_handles_bare_list_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/top_sellers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"title": "Ceramic Mug", "product_id": 7, "quantity": 3}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_product(7)))
        .mount(&server)
        .await;

    let report = test_driver(&server.uri())
        .best_selling_product_today()
        .await
        .expect("report should parse");
    match report {
        shopbridge_core::BestSellerReport::Sales {
            product_id,
            product_name,
            quantity_sold,
            total_sales,
        } => {
            assert_eq!(product_id, 7);
            assert_eq!(product_name, "Ceramic Mug");
            assert_eq!(quantity_sold, 3);
            assert_eq!(total_sales, Decimal::new(4350, 2));
        }
        shopbridge_core::BestSellerReport::NoSales { .. } => panic!("expected a sales report"),
    }
}

#[tokio::test]
async fn best_seller_handles_data_wrapped_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/top_sellers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"title": "Ceramic Mug", "product_id": "7", "quantity": "2"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_product(7)))
        .mount(&server)
        .await;

    let report = test_driver(&server.uri())
        .best_selling_product_today()
        .await
        .expect("wrapped shape should parse");
    match report {
        shopbridge_core::BestSellerReport::Sales {
            product_id,
            quantity_sold,
            ..
        } => {
            assert_eq!(product_id, 7);
            assert_eq!(quantity_sold, 2);
        }
        shopbridge_core::BestSellerReport::NoSales { .. } => panic!("expected a sales report"),
    }
}

#[tokio::test]
async fn best_seller_empty_window_is_no_sales_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/top_sellers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let report = test_driver(&server.uri())
        .best_selling_product_today()
        .await
        .expect("empty window is not an error");
    assert!(matches!(
        report,
        shopbridge_core::BestSellerReport::NoSales { .. }
    ));
}
