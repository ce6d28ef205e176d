//! WooCommerce adapter for the `wc/v3` REST API.
//!
//! Authenticates with the consumer key/secret pair via HTTP Basic auth.
//! Response fields are mapped field-by-field into the shared records;
//! status vocabulary is passed through verbatim.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use shopbridge_core::{
    BestSellerReport, FetchFilters, NewOrder, NewProduct, OperationResult, OrderRecord,
    ProductRecord, filters,
};

use crate::config::WooCommerceConfig;
use crate::driver::{FieldMap, StoreDriver};
use crate::error::StoreError;

/// Page size used when the caller supplies no `per_page` filter.
const DEFAULT_PER_PAGE: u32 = 20;

/// Every product created through this driver lands in this category.
/// Callers cannot override it through the interface - a documented
/// limitation of the create path.
const DEFAULT_CATEGORY_ID: i64 = 1;

/// Initial stock assigned to newly created products.
const DEFAULT_STOCK_QUANTITY: i64 = 10;

/// WooCommerce REST API driver.
///
/// Use [`WooCommerceDriver::new`] for production or
/// [`WooCommerceDriver::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct WooCommerceDriver {
    inner: Arc<WooCommerceInner>,
}

struct WooCommerceInner {
    client: reqwest::Client,
    base_url: Url,
    consumer_key: String,
    consumer_secret: String,
}

impl WooCommerceDriver {
    /// Create a driver against a production WooCommerce site.
    ///
    /// The `wc/v3` endpoint family lives under `{url}/wp-json/wc/v3/`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the HTTP client cannot be built or
    /// [`StoreError::Parse`] if the configured URL is invalid.
    pub fn new(config: &WooCommerceConfig) -> Result<Self, StoreError> {
        let base = format!("{}/wp-json/wc/v3", config.url.trim_end_matches('/'));
        Self::with_base_url(
            &base,
            &config.consumer_key,
            config.consumer_secret.expose_secret(),
        )
    }

    /// Create a driver with an explicit API root (for wiremock tests).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the HTTP client cannot be built or
    /// [`StoreError::Parse`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        // A trailing slash makes Url::join treat the last segment as a
        // directory rather than replacing it.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| StoreError::Parse(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            inner: Arc::new(WooCommerceInner {
                client,
                base_url,
                consumer_key: consumer_key.to_owned(),
                consumer_secret: consumer_secret.to_owned(),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| StoreError::Parse(format!("invalid endpoint path '{path}': {e}")))
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(&self.inner.consumer_key, Some(&self.inner.consumer_secret))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, StoreError> {
        let url = self.endpoint(path)?;
        let response = self
            .authed(self.inner.client.get(url).query(query))
            .send()
            .await?;
        handle_response(path, response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let url = self.endpoint(path)?;
        let response = self
            .authed(self.inner.client.post(url).json(body))
            .send()
            .await?;
        handle_response(path, response).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let url = self.endpoint(path)?;
        let response = self
            .authed(self.inner.client.put(url).json(body))
            .send()
            .await?;
        handle_response(path, response).await
    }

    /// Hard delete with `force=true` (bypasses trash, irreversible).
    ///
    /// A remote 404 is a message-only result, any other failure raises.
    async fn force_delete(&self, path: &str, missing: String) -> Result<i64, DeleteOutcome> {
        let url = self.endpoint(path).map_err(DeleteOutcome::Failed)?;
        let response = self
            .authed(self.inner.client.delete(url).query(&[("force", "true")]))
            .send()
            .await
            .map_err(|e| DeleteOutcome::Failed(e.into()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DeleteOutcome::Missing(missing));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeleteOutcome::Failed(StoreError::Api {
                status: status.as_u16(),
                body,
            }));
        }
        let deleted: WcId = response
            .json()
            .await
            .map_err(|e| DeleteOutcome::Failed(StoreError::Parse(e.to_string())))?;
        Ok(deleted.id)
    }
}

enum DeleteOutcome {
    Missing(String),
    Failed(StoreError),
}

fn delete_result(outcome: Result<i64, DeleteOutcome>, noun: &str) -> Result<OperationResult, StoreError> {
    match outcome {
        Ok(id) => Ok(OperationResult::completed(id, format!("{noun} {id} deleted"))),
        Err(DeleteOutcome::Missing(message)) => Ok(OperationResult::message_only(message)),
        Err(DeleteOutcome::Failed(err)) => Err(err),
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

/// Filter keys this driver forwards; everything else is silently ignored.
const SUPPORTED_FILTERS: &[&str] = &[
    filters::PER_PAGE,
    filters::CATEGORY,
    filters::STATUS,
    filters::SEARCH,
];

fn list_query(filter_params: &FetchFilters) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    for key in SUPPORTED_FILTERS {
        if let Some(value) = filter_params.get(key) {
            query.push((*key, value.to_owned()));
        }
    }
    if filter_params.per_page().is_none() {
        query.push((filters::PER_PAGE, DEFAULT_PER_PAGE.to_string()));
    }
    query
}

fn parse_price(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw).ok()
}

// Coerce a report field that the API returns either as a number or a
// numeric string.
fn value_as_i64(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

// ============================================================================
// Wire shapes (WooCommerce field names, preserved verbatim)
// ============================================================================

#[derive(Debug, Deserialize)]
struct WcId {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct WcProduct {
    id: i64,
    name: String,
    #[serde(default)]
    price: String,
    status: String,
    #[serde(default)]
    stock_quantity: Option<i64>,
    #[serde(default)]
    categories: Vec<WcCategory>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    images: Vec<WcImage>,
}

#[derive(Debug, Deserialize)]
struct WcCategory {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WcImage {
    src: String,
}

#[derive(Debug, Deserialize)]
struct WcOrder {
    id: i64,
    status: String,
    total: String,
    #[serde(default)]
    billing: Option<WcBilling>,
    date_created: String,
    #[serde(default)]
    line_items: Vec<WcLineItem>,
}

#[derive(Debug, Deserialize)]
struct WcBilling {
    #[serde(default)]
    first_name: String,
}

#[derive(Debug, Deserialize)]
struct WcLineItem {
    product_id: i64,
}

fn map_product(p: WcProduct) -> ProductRecord {
    ProductRecord {
        id: p.id,
        name: p.name,
        price: parse_price(&p.price),
        status: p.status,
        stock_quantity: p.stock_quantity.unwrap_or(0).max(0),
        categories: p
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        description: p.description,
        image: p.images.into_iter().next().map(|i| i.src),
    }
}

fn map_order(o: WcOrder) -> OrderRecord {
    let customer = match o.billing {
        Some(billing) if !billing.first_name.is_empty() => billing.first_name,
        _ => "Unknown".to_string(),
    };
    OrderRecord {
        id: o.id,
        status: o.status,
        total: o.total,
        customer,
        date: o.date_created,
        product_id: o.line_items.first().map(|li| li.product_id),
    }
}

#[async_trait::async_trait]
impl StoreDriver for WooCommerceDriver {
    #[instrument(skip(self, filter_params))]
    async fn fetch_products(
        &self,
        filter_params: &FetchFilters,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let products: Vec<WcProduct> = self.get("products", &list_query(filter_params)).await?;
        Ok(products.into_iter().map(map_product).collect())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_product(&self, input: &NewProduct) -> Result<OperationResult, StoreError> {
        let body = serde_json::json!({
            "name": input.name,
            "type": "simple",
            "regular_price": input.price.to_string(),
            "description": input.description,
            "status": "publish",
            "manage_stock": true,
            "stock_quantity": DEFAULT_STOCK_QUANTITY,
            "categories": [{"id": DEFAULT_CATEGORY_ID}],
        });
        let created: WcId = self.post("products", &body).await?;
        Ok(OperationResult::completed(
            created.id,
            format!("Product '{}' created", input.name),
        ))
    }

    #[instrument(skip(self, fields))]
    async fn update_product(
        &self,
        id: i64,
        fields: &FieldMap,
    ) -> Result<OperationResult, StoreError> {
        let updated: WcId = self.put(&format!("products/{id}"), fields).await?;
        Ok(OperationResult::completed(
            updated.id,
            format!("Product {id} updated"),
        ))
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: i64) -> Result<OperationResult, StoreError> {
        let outcome = self
            .force_delete(&format!("products/{id}"), format!("Product {id} not found"))
            .await;
        delete_result(outcome, "Product")
    }

    #[instrument(skip(self, filter_params))]
    async fn fetch_orders(
        &self,
        filter_params: &FetchFilters,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        let orders: Vec<WcOrder> = self.get("orders", &list_query(filter_params)).await?;
        Ok(orders.into_iter().map(map_order).collect())
    }

    #[instrument(skip(self, input), fields(customer = %input.customer))]
    async fn create_order(&self, input: &NewOrder) -> Result<OperationResult, StoreError> {
        let email_slug = input.customer.to_lowercase().replace(' ', ".");
        let body = serde_json::json!({
            "status": "pending",
            "billing": {
                "first_name": input.customer,
                "last_name": "",
                "email": format!("{email_slug}_demo@example.com"),
            },
            "line_items": [{"product_id": input.product_id, "quantity": input.quantity}],
            "total": input.total.to_string(),
        });
        let created: WcId = self.post("orders", &body).await?;
        Ok(OperationResult::completed(
            created.id,
            format!("Order {} created for {}", created.id, input.customer),
        ))
    }

    #[instrument(skip(self))]
    async fn update_order_status(
        &self,
        id: i64,
        new_status: &str,
    ) -> Result<OperationResult, StoreError> {
        let body = serde_json::json!({"status": new_status});
        let updated: WcId = self.put(&format!("orders/{id}"), &body).await?;
        Ok(OperationResult::completed(
            updated.id,
            format!("Order {id} moved to '{new_status}'"),
        ))
    }

    #[instrument(skip(self))]
    async fn delete_order(&self, id: i64) -> Result<OperationResult, StoreError> {
        let outcome = self
            .force_delete(&format!("orders/{id}"), format!("Order {id} not found"))
            .await;
        delete_result(outcome, "Order")
    }

    /// Queries `reports/top_sellers` scoped to the current platform-local
    /// calendar day. The endpoint has been observed to answer with either a
    /// bare list or an object wrapping the list under `"data"` - both are
    /// accepted.
    #[instrument(skip(self))]
    async fn best_selling_product_today(&self) -> Result<BestSellerReport, StoreError> {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let report: serde_json::Value = self
            .get(
                "reports/top_sellers",
                &[("date_min", today.clone()), ("date_max", today)],
            )
            .await?;

        let entries = match &report {
            serde_json::Value::Array(list) => list.as_slice(),
            serde_json::Value::Object(map) => map
                .get("data")
                .and_then(serde_json::Value::as_array)
                .map(Vec::as_slice)
                .ok_or_else(|| {
                    StoreError::Parse("top_sellers response has no entry list".to_string())
                })?,
            _ => {
                return Err(StoreError::Parse(
                    "unexpected top_sellers response shape".to_string(),
                ));
            }
        };

        let Some(top) = entries.first() else {
            return Ok(BestSellerReport::no_sales());
        };

        let product_id = top
            .get("product_id")
            .and_then(value_as_i64)
            .ok_or_else(|| StoreError::Parse("top seller entry missing product_id".to_string()))?;
        let quantity_sold = top.get("quantity").and_then(value_as_i64).unwrap_or(0);

        // The report carries title and quantity only; resolve the product's
        // current price to compute revenue.
        let product: WcProduct = self.get(&format!("products/{product_id}"), &[]).await?;
        let unit_price = parse_price(&product.price).unwrap_or(Decimal::ZERO);
        let product_name = top
            .get("title")
            .and_then(serde_json::Value::as_str)
            .map_or(product.name, ToOwned::to_owned);

        Ok(BestSellerReport::Sales {
            product_id,
            product_name,
            quantity_sold,
            total_sales: unit_price * Decimal::from(quantity_sold),
        })
    }
}

impl std::fmt::Debug for WooCommerceDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceDriver")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
