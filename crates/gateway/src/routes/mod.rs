//! HTTP routes.

pub mod chat;
pub mod orders;
pub mod products;
pub mod reports;

use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full gateway router.
///
/// CORS is wide open: the gateway fronts a browser client served from
/// elsewhere and carries no credentials of its own.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/{id}",
            put(products::update).delete(products::remove),
        )
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/{id}", delete(orders::remove))
        .route("/api/orders/{id}/status", put(orders::update_status))
        .route("/api/reports/best-seller", get(reports::best_seller))
        .route("/api/reports/out-of-stock", get(reports::out_of_stock))
        .route("/api/reports/last-order", get(reports::last_order))
        .route("/chat", post(chat::respond))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness check.
async fn root() -> Json<Value> {
    Json(json!({ "message": "shopbridge gateway" }))
}
