//! The `StoreDriver` capability trait.

use async_trait::async_trait;

use shopbridge_core::{
    BestSellerReport, FetchFilters, NewOrder, NewProduct, OperationResult, OrderRecord,
    ProductRecord,
};

use crate::error::StoreError;

/// Partial-field map for update operations.
///
/// Field names are passed through verbatim to the remote API without
/// validation - an invalid name surfaces as whatever error the platform
/// returns.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// Uniform contract every e-commerce backend adapter must satisfy.
///
/// # Contract
///
/// - `fetch_*` accepts backend-agnostic [`FetchFilters`] and silently
///   ignores keys the platform does not support, except `per_page` which
///   must be honored when supplied.
/// - `create_*`/`update_*` perform exactly one logical mutation; partial
///   success (e.g. a resource created but a follow-up step failed) is
///   surfaced as an error, never swallowed.
/// - `delete_*` distinguishes "resource not found" (message-only
///   [`OperationResult`], no error) from any other remote failure (raised).
/// - Identifiers are platform-native and are never translated across
///   backends.
#[async_trait]
pub trait StoreDriver: Send + Sync {
    /// Fetch a fresh snapshot of products from the remote platform.
    async fn fetch_products(
        &self,
        filters: &FetchFilters,
    ) -> Result<Vec<ProductRecord>, StoreError>;

    /// Create a product.
    async fn create_product(&self, input: &NewProduct) -> Result<OperationResult, StoreError>;

    /// Partial-field product update; `fields` pass through verbatim.
    async fn update_product(
        &self,
        id: i64,
        fields: &FieldMap,
    ) -> Result<OperationResult, StoreError>;

    /// Hard-delete a product.
    async fn delete_product(&self, id: i64) -> Result<OperationResult, StoreError>;

    /// Fetch a fresh snapshot of orders from the remote platform.
    async fn fetch_orders(&self, filters: &FetchFilters) -> Result<Vec<OrderRecord>, StoreError>;

    /// Create an order.
    async fn create_order(&self, input: &NewOrder) -> Result<OperationResult, StoreError>;

    /// Set an order's status.
    async fn update_order_status(
        &self,
        id: i64,
        new_status: &str,
    ) -> Result<OperationResult, StoreError>;

    /// Hard-delete an order.
    async fn delete_order(&self, id: i64) -> Result<OperationResult, StoreError>;

    /// Best-selling product for the current calendar day (platform-local).
    ///
    /// Backends without a reporting endpoint keep this default, so callers
    /// get an explicit [`StoreError::Unsupported`] rather than a silent
    /// no-op.
    async fn best_selling_product_today(&self) -> Result<BestSellerReport, StoreError> {
        Err(StoreError::Unsupported("best_selling_product_today"))
    }
}
