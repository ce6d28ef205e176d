//! Gateway error handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use shopbridge_store::StoreError;

use crate::services::llm::LlmError;

/// Errors surfaced by gateway handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store-layer failure, mapped to a status by its variant.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Language-model failure while answering free-text chat.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Malformed request payload or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(err) => match err {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                StoreError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
                StoreError::Http(_) | StoreError::Api { .. } | StoreError::Parse(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::Llm(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to return to the client.
    ///
    /// Upstream failure detail (response bodies, transport errors) stays in
    /// the logs; clients get a generic message for 5xx statuses.
    fn public_message(&self) -> String {
        match self {
            Self::Store(err) => match err {
                StoreError::NotFound(_) | StoreError::InvalidInput(_) => err.to_string(),
                StoreError::Unsupported(op) => {
                    format!("operation not supported by the active backend: {op}")
                }
                StoreError::Http(_) | StoreError::Api { .. } | StoreError::Parse(_) => {
                    "upstream store request failed".to_string()
                }
            },
            Self::Llm(_) => "language model request failed".to_string(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "request failed");
        } else {
            tracing::warn!(error = %self, status = %status, "request rejected");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::Store(StoreError::NotFound("product 9 not found".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.public_message().contains("product 9"));
    }

    #[test]
    fn test_unsupported_maps_to_501() {
        let err = AppError::Store(StoreError::Unsupported("best_selling_product_today"));
        assert_eq!(err.status_code(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_upstream_api_error_hides_body_from_clients() {
        let err = AppError::Store(StoreError::Api {
            status: 500,
            body: "internal stack trace".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(!err.public_message().contains("stack trace"));
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let err = AppError::Store(StoreError::InvalidInput("quantity must be positive".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
