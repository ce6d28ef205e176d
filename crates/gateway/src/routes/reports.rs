//! Reporting handlers.
//!
//! Out-of-stock and last-order are gateway-side views over the plain fetch
//! operations; only best-seller reaches a backend reporting endpoint (and
//! returns 501 on backends without one).

use axum::Json;
use axum::extract::State;

use shopbridge_core::{BestSellerReport, FetchFilters, OrderRecord, ProductRecord};
use shopbridge_store::StoreError;

use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/reports/best-seller`.
pub async fn best_seller(
    State(state): State<AppState>,
) -> Result<Json<BestSellerReport>, AppError> {
    let report = state.store().best_selling_product_today().await?;
    Ok(Json(report))
}

/// `GET /api/reports/out-of-stock` - products with zero stock.
pub async fn out_of_stock(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductRecord>>, AppError> {
    let products = state.store().fetch_products(&FetchFilters::new()).await?;
    let depleted = products
        .into_iter()
        .filter(|p| p.stock_quantity == 0)
        .collect();
    Ok(Json(depleted))
}

/// `GET /api/reports/last-order` - most recent order, 404 when there are
/// none.
pub async fn last_order(State(state): State<AppState>) -> Result<Json<OrderRecord>, AppError> {
    let mut orders = state.store().fetch_orders(&FetchFilters::new()).await?;
    if orders.is_empty() {
        return Err(AppError::Store(StoreError::NotFound(
            "no orders found".to_string(),
        )));
    }
    Ok(Json(orders.remove(0)))
}
