//! The `Store` facade.

use std::sync::Arc;

use shopbridge_core::{
    BestSellerReport, FetchFilters, NewOrder, NewProduct, OperationResult, OrderRecord,
    ProductRecord,
};

use crate::config::{BackendKind, StoreConfig};
use crate::driver::{FieldMap, StoreDriver};
use crate::error::StoreError;
use crate::shopify::ShopifyDriver;
use crate::woocommerce::WooCommerceDriver;

/// Owns exactly one driver instance for the process lifetime.
///
/// Selected once at construction from [`StoreConfig`]; every method is pure
/// delegation to the active driver. The facade adds no behavior of its own -
/// it exists so call sites never know which backend is active, and so
/// cross-cutting concerns have a single place to land later.
#[derive(Clone)]
pub struct Store {
    driver: Arc<dyn StoreDriver>,
    backend: BackendKind,
}

impl Store {
    /// Select and construct the configured driver.
    ///
    /// # Errors
    ///
    /// Fails fast at construction: [`StoreError::InvalidInput`] when the
    /// selected backend's credentials block is missing, or the driver's own
    /// construction error.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let driver: Arc<dyn StoreDriver> = match config.backend {
            BackendKind::WooCommerce => {
                let creds = config.woocommerce.as_ref().ok_or_else(|| {
                    StoreError::InvalidInput(
                        "woocommerce backend selected but credentials are not configured"
                            .to_string(),
                    )
                })?;
                Arc::new(WooCommerceDriver::new(creds)?)
            }
            BackendKind::Shopify => {
                let creds = config.shopify.as_ref().ok_or_else(|| {
                    StoreError::InvalidInput(
                        "shopify backend selected but credentials are not configured".to_string(),
                    )
                })?;
                Arc::new(ShopifyDriver::new(creds)?)
            }
        };
        Ok(Self {
            driver,
            backend: config.backend,
        })
    }

    /// Wrap an already-constructed driver (for tests and injection).
    #[must_use]
    pub fn with_driver(backend: BackendKind, driver: Arc<dyn StoreDriver>) -> Self {
        Self { driver, backend }
    }

    /// Which backend this store delegates to.
    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    /// See [`StoreDriver::fetch_products`].
    ///
    /// # Errors
    ///
    /// Propagates the driver's error unchanged.
    pub async fn fetch_products(
        &self,
        filter_params: &FetchFilters,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        self.driver.fetch_products(filter_params).await
    }

    /// See [`StoreDriver::create_product`].
    ///
    /// # Errors
    ///
    /// Propagates the driver's error unchanged.
    pub async fn create_product(&self, input: &NewProduct) -> Result<OperationResult, StoreError> {
        self.driver.create_product(input).await
    }

    /// See [`StoreDriver::update_product`].
    ///
    /// # Errors
    ///
    /// Propagates the driver's error unchanged.
    pub async fn update_product(
        &self,
        id: i64,
        fields: &FieldMap,
    ) -> Result<OperationResult, StoreError> {
        self.driver.update_product(id, fields).await
    }

    /// See [`StoreDriver::delete_product`].
    ///
    /// # Errors
    ///
    /// Propagates the driver's error unchanged.
    pub async fn delete_product(&self, id: i64) -> Result<OperationResult, StoreError> {
        self.driver.delete_product(id).await
    }

    /// See [`StoreDriver::fetch_orders`].
    ///
    /// # Errors
    ///
    /// Propagates the driver's error unchanged.
    pub async fn fetch_orders(
        &self,
        filter_params: &FetchFilters,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        self.driver.fetch_orders(filter_params).await
    }

    /// See [`StoreDriver::create_order`].
    ///
    /// # Errors
    ///
    /// Propagates the driver's error unchanged.
    pub async fn create_order(&self, input: &NewOrder) -> Result<OperationResult, StoreError> {
        self.driver.create_order(input).await
    }

    /// See [`StoreDriver::update_order_status`].
    ///
    /// # Errors
    ///
    /// Propagates the driver's error unchanged.
    pub async fn update_order_status(
        &self,
        id: i64,
        new_status: &str,
    ) -> Result<OperationResult, StoreError> {
        self.driver.update_order_status(id, new_status).await
    }

    /// See [`StoreDriver::delete_order`].
    ///
    /// # Errors
    ///
    /// Propagates the driver's error unchanged.
    pub async fn delete_order(&self, id: i64) -> Result<OperationResult, StoreError> {
        self.driver.delete_order(id).await
    }

    /// See [`StoreDriver::best_selling_product_today`].
    ///
    /// # Errors
    ///
    /// Propagates the driver's error unchanged, including
    /// [`StoreError::Unsupported`] from backends without reporting.
    pub async fn best_selling_product_today(&self) -> Result<BestSellerReport, StoreError> {
        self.driver.best_selling_product_today().await
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
