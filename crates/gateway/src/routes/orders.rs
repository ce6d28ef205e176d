//! Order CRUD handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use shopbridge_core::{FetchFilters, NewOrder, OperationResult, OrderRecord};

use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/orders` - list orders, forwarding the query string as fetch
/// filters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<OrderRecord>>, AppError> {
    let filters: FetchFilters = params.into_iter().collect();
    let orders = state.store().fetch_orders(&filters).await?;
    Ok(Json(orders))
}

/// `POST /api/orders` - create an order.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewOrder>,
) -> Result<(StatusCode, Json<OperationResult>), AppError> {
    if input.quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be positive".to_string()));
    }
    let result = state.store().create_order(&input).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Body of `PUT /api/orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: String,
}

/// `PUT /api/orders/{id}/status` - set the platform-native order status.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<OperationResult>, AppError> {
    if body.status.trim().is_empty() {
        return Err(AppError::BadRequest("status is required".to_string()));
    }
    let result = state.store().update_order_status(id, &body.status).await?;
    Ok(Json(result))
}

/// `DELETE /api/orders/{id}`.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OperationResult>, AppError> {
    let result = state.store().delete_order(id).await?;
    Ok(Json(result))
}
