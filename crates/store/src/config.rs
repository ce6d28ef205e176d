//! Driver-selection configuration.

use std::str::FromStr;

use secrecy::SecretString;

use crate::error::StoreError;

/// Which backend the [`Store`](crate::Store) facade drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// WooCommerce REST API (`wc/v3`).
    WooCommerce,
    /// Shopify Admin REST API.
    Shopify,
}

impl FromStr for BackendKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "woocommerce" => Ok(Self::WooCommerce),
            "shopify" => Ok(Self::Shopify),
            other => Err(StoreError::InvalidInput(format!(
                "unsupported store backend '{other}' (expected 'woocommerce' or 'shopify')"
            ))),
        }
    }
}

impl BackendKind {
    /// The configuration identifier for this backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WooCommerce => "woocommerce",
            Self::Shopify => "shopify",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WooCommerce credentials and endpoint.
///
/// Implements `Debug` manually to redact the consumer secret.
#[derive(Clone)]
pub struct WooCommerceConfig {
    /// Site base URL (e.g. `https://shop.example.com`).
    pub url: String,
    /// REST API consumer key.
    pub consumer_key: String,
    /// REST API consumer secret.
    pub consumer_secret: SecretString,
}

impl std::fmt::Debug for WooCommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceConfig")
            .field("url", &self.url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

/// Shopify credentials and endpoint.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Shop domain (e.g. `your-store.myshopify.com`).
    pub shop: String,
    /// Admin API access token (bearer).
    pub access_token: SecretString,
    /// Admin API version (e.g. `2024-10`).
    pub api_version: String,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("shop", &self.shop)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Complete driver-selection configuration.
///
/// Only the credentials block for the selected backend needs to be present;
/// [`Store::new`](crate::Store::new) fails fast at construction when it is
/// missing.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Selected backend.
    pub backend: BackendKind,
    /// WooCommerce credentials, required when `backend` is `WooCommerce`.
    pub woocommerce: Option<WooCommerceConfig>,
    /// Shopify credentials, required when `backend` is `Shopify`.
    pub shopify: Option<ShopifyConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_parses_known_identifiers() {
        assert_eq!(
            "woocommerce".parse::<BackendKind>().unwrap(),
            BackendKind::WooCommerce
        );
        assert_eq!(
            "shopify".parse::<BackendKind>().unwrap(),
            BackendKind::Shopify
        );
    }

    #[test]
    fn backend_kind_rejects_unknown_identifier() {
        let err = "bigcommerce".parse::<BackendKind>().unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert!(err.to_string().contains("bigcommerce"));
    }

    #[test]
    fn woocommerce_config_debug_redacts_secret() {
        let config = WooCommerceConfig {
            url: "https://shop.example.com".to_string(),
            consumer_key: "ck_test".to_string(),
            consumer_secret: SecretString::from("cs_super_secret"),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("ck_test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("cs_super_secret"));
    }

    #[test]
    fn shopify_config_debug_redacts_token() {
        let config = ShopifyConfig {
            shop: "test.myshopify.com".to_string(),
            access_token: SecretString::from("shpat_secret_token"),
            api_version: "2024-10".to_string(),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("test.myshopify.com"));
        assert!(!debug_output.contains("shpat_secret_token"));
    }
}
