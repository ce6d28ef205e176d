//! Product CRUD handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use shopbridge_core::{FetchFilters, NewProduct, OperationResult, ProductRecord};
use shopbridge_store::FieldMap;

use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/products` - list products, forwarding the query string as
/// fetch filters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<ProductRecord>>, AppError> {
    let filters: FetchFilters = params.into_iter().collect();
    let products = state.store().fetch_products(&filters).await?;
    Ok(Json(products))
}

/// `POST /api/products` - create a product.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<OperationResult>), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("product name is required".to_string()));
    }
    let result = state.store().create_product(&input).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// `PUT /api/products/{id}` - partial update; body fields pass through to
/// the backend verbatim.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<FieldMap>,
) -> Result<Json<OperationResult>, AppError> {
    let result = state.store().update_product(id, &fields).await?;
    Ok(Json(result))
}

/// `DELETE /api/products/{id}`.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OperationResult>, AppError> {
    let result = state.store().delete_product(id).await?;
    Ok(Json(result))
}
