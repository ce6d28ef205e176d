//! Shopify adapter for the Admin REST API.
//!
//! Authenticates with a bearer access token sent as the
//! `X-Shopify-Access-Token` header. Endpoints use the `.json` suffix under
//! `https://{shop}/admin/api/{version}/`.
//!
//! This backend has no reporting endpoint, so
//! `best_selling_product_today` keeps the trait default and raises
//! `Unsupported`.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use shopbridge_core::{
    FetchFilters, NewOrder, NewProduct, OperationResult, OrderRecord, ProductRecord, filters,
};

use crate::config::ShopifyConfig;
use crate::driver::{FieldMap, StoreDriver};
use crate::error::StoreError;

/// Page size used when the caller supplies no `per_page` filter.
const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Shopify Admin REST API driver.
///
/// Use [`ShopifyDriver::new`] for production or
/// [`ShopifyDriver::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct ShopifyDriver {
    inner: Arc<ShopifyInner>,
}

struct ShopifyInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ShopifyDriver {
    /// Create a driver against a production shop.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the HTTP client cannot be built or
    /// [`StoreError::Parse`] if the shop domain does not form a valid URL.
    pub fn new(config: &ShopifyConfig) -> Result<Self, StoreError> {
        let base = format!(
            "https://{}/admin/api/{}",
            config.shop.trim_end_matches('/'),
            config.api_version
        );
        Self::with_base_url(&base, config.access_token.expose_secret())
    }

    /// Create a driver with an explicit API root (for wiremock tests).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the HTTP client cannot be built,
    /// [`StoreError::Parse`] on an invalid URL or token that cannot form a
    /// header value.
    pub fn with_base_url(base_url: &str, access_token: &str) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let mut token_value = HeaderValue::from_str(access_token)
            .map_err(|e| StoreError::Parse(format!("invalid access token: {e}")))?;
        token_value.set_sensitive(true);
        headers.insert("X-Shopify-Access-Token", token_value);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| StoreError::Parse(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            inner: Arc::new(ShopifyInner { client, base_url }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| StoreError::Parse(format!("invalid endpoint path '{path}': {e}")))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, StoreError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.get(url).query(query).send().await?;
        handle_response(path, response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.post(url).json(body).send().await?;
        handle_response(path, response).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.put(url).json(body).send().await?;
        handle_response(path, response).await
    }

    /// HTTP 200 is success, 404 is a message-only not-found result, any
    /// other status raises.
    async fn delete(&self, path: &str, id: i64, noun: &str) -> Result<OperationResult, StoreError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.delete(url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(OperationResult::message_only(format!(
                "{noun} {id} not found"
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(OperationResult::completed(id, format!("{noun} {id} deleted")))
    }
}

async fn handle_response<T: DeserializeOwned>(
    context: &str,
    response: reqwest::Response,
) -> Result<T, StoreError> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(StoreError::NotFound(context.to_owned()));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Api {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json()
        .await
        .map_err(|e| StoreError::Parse(format!("{context}: {e}")))
}

fn list_query(filter_params: &FetchFilters) -> Vec<(&'static str, String)> {
    // Shopify calls the page-size cap `limit`; `status` forwards verbatim.
    // Other filter keys have no REST equivalent here and are ignored.
    let mut query = vec![(
        "limit",
        filter_params
            .per_page()
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .to_string(),
    )];
    if let Some(status) = filter_params.get(filters::STATUS) {
        query.push(("status", status.to_owned()));
    }
    query
}

// ============================================================================
// Wire shapes (Shopify field names, preserved verbatim)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ProductsEnvelope {
    products: Vec<ShopifyProduct>,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: ShopifyProduct,
}

#[derive(Debug, Deserialize)]
struct OrdersEnvelope {
    orders: Vec<ShopifyOrder>,
}

#[derive(Debug, Deserialize)]
struct OrderEnvelope {
    order: ShopifyOrder,
}

#[derive(Debug, Deserialize)]
struct CustomersEnvelope {
    customers: Vec<ShopifyCustomer>,
}

#[derive(Debug, Deserialize)]
struct ShopifyProduct {
    id: i64,
    title: String,
    #[serde(default)]
    body_html: Option<String>,
    #[serde(default)]
    product_type: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    variants: Vec<ShopifyVariant>,
    #[serde(default)]
    image: Option<ShopifyImage>,
}

#[derive(Debug, Deserialize)]
struct ShopifyVariant {
    id: i64,
    #[serde(default)]
    price: String,
    #[serde(default)]
    inventory_quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ShopifyImage {
    src: String,
}

#[derive(Debug, Deserialize)]
struct ShopifyOrder {
    id: i64,
    #[serde(default)]
    financial_status: Option<String>,
    #[serde(default)]
    total_price: String,
    #[serde(default)]
    customer: Option<ShopifyCustomer>,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    line_items: Vec<ShopifyLineItem>,
}

#[derive(Debug, Deserialize)]
struct ShopifyCustomer {
    id: i64,
    #[serde(default)]
    first_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ShopifyLineItem {
    #[serde(default)]
    product_id: Option<i64>,
}

fn map_product(p: ShopifyProduct) -> ProductRecord {
    // Price comes from the first variant; a product with zero variants has
    // no price.
    let first_variant = p.variants.first();
    let price = first_variant.and_then(|v| Decimal::from_str(&v.price).ok());
    let stock_quantity = first_variant
        .and_then(|v| v.inventory_quantity)
        .unwrap_or(0)
        .max(0);

    ProductRecord {
        id: p.id,
        name: p.title,
        price,
        status: p.status,
        stock_quantity,
        categories: p.product_type,
        description: p.body_html.unwrap_or_default(),
        image: p.image.map(|i| i.src),
    }
}

fn map_order(o: ShopifyOrder) -> OrderRecord {
    let customer = o
        .customer
        .and_then(|c| c.first_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    OrderRecord {
        id: o.id,
        status: o.financial_status.unwrap_or_else(|| "pending".to_string()),
        total: o.total_price,
        customer,
        date: o.created_at,
        product_id: o.line_items.first().and_then(|li| li.product_id),
    }
}

#[async_trait::async_trait]
impl StoreDriver for ShopifyDriver {
    #[instrument(skip(self, filter_params))]
    async fn fetch_products(
        &self,
        filter_params: &FetchFilters,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let envelope: ProductsEnvelope = self
            .get("products.json", &list_query(filter_params))
            .await?;
        Ok(envelope.products.into_iter().map(map_product).collect())
    }

    #[instrument(skip(self, input), fields(title = %input.name))]
    async fn create_product(&self, input: &NewProduct) -> Result<OperationResult, StoreError> {
        let body = serde_json::json!({
            "product": {
                "title": input.name,
                "body_html": input.description,
                "status": "active",
                "variants": [{"price": input.price.to_string()}],
            }
        });
        let envelope: ProductEnvelope = self.post("products.json", &body).await?;
        Ok(OperationResult::completed(
            envelope.product.id,
            format!("Product '{}' created", input.name),
        ))
    }

    #[instrument(skip(self, fields))]
    async fn update_product(
        &self,
        id: i64,
        fields: &FieldMap,
    ) -> Result<OperationResult, StoreError> {
        let mut product = fields.clone();
        product.insert("id".to_string(), serde_json::Value::from(id));
        let body = serde_json::json!({"product": product});
        let envelope: ProductEnvelope = self.put(&format!("products/{id}.json"), &body).await?;
        Ok(OperationResult::completed(
            envelope.product.id,
            format!("Product {id} updated"),
        ))
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: i64) -> Result<OperationResult, StoreError> {
        self.delete(&format!("products/{id}.json"), id, "Product")
            .await
    }

    #[instrument(skip(self, filter_params))]
    async fn fetch_orders(
        &self,
        filter_params: &FetchFilters,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        let envelope: OrdersEnvelope = self.get("orders.json", &list_query(filter_params)).await?;
        Ok(envelope.orders.into_iter().map(map_order).collect())
    }

    /// Multi-step creation, failing fast at each step:
    ///
    /// 1. Look up the product to obtain its first variant id - a product
    ///    with no variants raises before any order call is made.
    /// 2. Resolve an existing customer by first-name search, falling back
    ///    to a guest customer built from the supplied name.
    /// 3. Submit the order with a `pending` financial status.
    #[instrument(skip(self, input), fields(customer = %input.customer))]
    async fn create_order(&self, input: &NewOrder) -> Result<OperationResult, StoreError> {
        let envelope: ProductEnvelope = self
            .get(&format!("products/{}.json", input.product_id), &[])
            .await?;
        let Some(variant) = envelope.product.variants.first() else {
            return Err(StoreError::InvalidInput(format!(
                "product {} has no variants to order",
                input.product_id
            )));
        };
        let variant_id = variant.id;

        let first_name = input
            .customer
            .split_whitespace()
            .next()
            .unwrap_or(input.customer.as_str());
        let found: CustomersEnvelope = self
            .get(
                "customers/search.json",
                &[("query", first_name.to_owned())],
            )
            .await?;

        let customer = found.customers.first().map_or_else(
            || serde_json::json!({"first_name": input.customer, "last_name": ""}),
            |existing| serde_json::json!({"id": existing.id}),
        );

        let body = serde_json::json!({
            "order": {
                "line_items": [{"variant_id": variant_id, "quantity": input.quantity}],
                "financial_status": "pending",
                "customer": customer,
            }
        });
        let created: OrderEnvelope = self.post("orders.json", &body).await?;
        Ok(OperationResult::completed(
            created.order.id,
            format!("Order {} created for {}", created.order.id, input.customer),
        ))
    }

    #[instrument(skip(self))]
    async fn update_order_status(
        &self,
        id: i64,
        new_status: &str,
    ) -> Result<OperationResult, StoreError> {
        // Order status on this backend is the financial status string.
        let body = serde_json::json!({
            "order": {"id": id, "financial_status": new_status}
        });
        let envelope: OrderEnvelope = self.put(&format!("orders/{id}.json"), &body).await?;
        Ok(OperationResult::completed(
            envelope.order.id,
            format!("Order {id} moved to '{new_status}'"),
        ))
    }

    #[instrument(skip(self))]
    async fn delete_order(&self, id: i64) -> Result<OperationResult, StoreError> {
        self.delete(&format!("orders/{id}.json"), id, "Order").await
    }
}

impl std::fmt::Debug for ShopifyDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyDriver")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
