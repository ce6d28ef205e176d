//! Error taxonomy for the driver layer.

use thiserror::Error;

/// Errors raised by store drivers and the facade.
///
/// Propagation policy: drivers never swallow remote failures and the facade
/// never wraps them. No retries - every call is attempted exactly once, so a
/// transient failure (including a remote 429) surfaces immediately as
/// [`StoreError::Api`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection-level failure from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Unclassified non-2xx remote response, with enough detail to log.
    #[error("remote API error: {status} - {body}")]
    Api {
        /// Remote HTTP status code.
        status: u16,
        /// Remote response body, verbatim.
        body: String,
    },

    /// The targeted id does not exist (fetch/update paths - delete maps
    /// remote 404s to a message-only result instead).
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller input rejected before any network call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The active backend does not implement this capability.
    #[error("unsupported capability: {0}")]
    Unsupported(&'static str),

    /// Remote payload did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_carries_status_and_body() {
        let err = StoreError::Api {
            status: 500,
            body: "woocommerce_rest_cannot_view".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "remote API error: 500 - woocommerce_rest_cannot_view"
        );
    }

    #[test]
    fn unsupported_names_the_capability() {
        let err = StoreError::Unsupported("best_selling_product_today");
        assert_eq!(
            err.to_string(),
            "unsupported capability: best_selling_product_today"
        );
    }
}
