//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STORE_BACKEND` - Active store backend: `woocommerce` or `shopify`
//!
//! ## Required when `STORE_BACKEND=woocommerce`
//! - `WOOCOMMERCE_URL` - Base URL of the WordPress site
//! - `WOOCOMMERCE_CONSUMER_KEY` - REST API consumer key
//! - `WOOCOMMERCE_CONSUMER_SECRET` - REST API consumer secret
//!
//! ## Required when `STORE_BACKEND=shopify`
//! - `SHOPIFY_SHOP` - Shop domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token
//!
//! ## Optional
//! - `GATEWAY_HOST` - Bind address (default: 0.0.0.0)
//! - `GATEWAY_PORT` - Listen port (default: 8000)
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2024-10)
//! - `GEMINI_API_KEY` - Google Gemini API key (enables free-text chat replies)
//! - `GEMINI_MODEL` - Gemini model ID (default: gemini-2.0-flash)
//!
//! ## Optional (Twilio - enables WhatsApp notifications for chat writes)
//! - `TWILIO_ACCOUNT_SID` - Twilio account SID
//! - `TWILIO_AUTH_TOKEN` - Twilio auth token
//! - `TWILIO_WHATSAPP_TO` - Recipient (e.g., whatsapp:+15551234567)
//! - `TWILIO_WHATSAPP_FROM` - Sender (default: the Twilio sandbox number)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use shopbridge_store::{BackendKind, ShopifyConfig, StoreConfig, WooCommerceConfig};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_SHOPIFY_API_VERSION: &str = "2024-10";
const DEFAULT_WHATSAPP_FROM: &str = "whatsapp:+14155238886";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Gateway application configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Store backend selection and credentials
    pub store: StoreConfig,
    /// Gemini configuration (optional - enables free-text chat replies)
    pub gemini: Option<GeminiConfig>,
    /// Twilio configuration (optional - enables WhatsApp notifications)
    pub twilio: Option<TwilioConfig>,
}

/// Google Gemini API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Gemini API key
    pub api_key: SecretString,
    /// Model ID (e.g., gemini-2.0-flash)
    pub model: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Twilio WhatsApp configuration.
///
/// Implements `Debug` manually to redact the auth token.
#[derive(Clone)]
pub struct TwilioConfig {
    /// Twilio account SID
    pub account_sid: String,
    /// Twilio auth token
    pub auth_token: SecretString,
    /// Sender number in `whatsapp:+E164` form
    pub from_number: String,
    /// Recipient number in `whatsapp:+E164` form
    pub to_number: String,
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("from_number", &self.from_number)
            .field("to_number", &self.to_number)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    /// Only the credentials block for the selected backend is required; the
    /// other backend's variables are ignored entirely.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("GATEWAY_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("GATEWAY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("GATEWAY_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("GATEWAY_PORT".to_string(), e.to_string()))?;

        let store = store_config_from_env()?;
        let gemini = GeminiConfig::from_env();
        let twilio = TwilioConfig::from_env()?;

        Ok(Self {
            host,
            port,
            store,
            gemini,
            twilio,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl GeminiConfig {
    /// Load Gemini configuration from environment.
    ///
    /// Returns `None` if `GEMINI_API_KEY` is not set (free-text replies
    /// fall back to a canned message).
    fn from_env() -> Option<Self> {
        get_optional_env("GEMINI_API_KEY").map(|key| Self {
            api_key: SecretString::from(key),
            model: get_env_or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        })
    }
}

impl TwilioConfig {
    /// Load Twilio configuration from environment.
    ///
    /// Returns `None` when no Twilio variables are set (notifications
    /// disabled). SID, auth token and recipient must be set together; the
    /// sender defaults to the Twilio WhatsApp sandbox number.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_parts(
            get_optional_env("TWILIO_ACCOUNT_SID"),
            get_optional_env("TWILIO_AUTH_TOKEN"),
            get_optional_env("TWILIO_WHATSAPP_TO"),
            get_optional_env("TWILIO_WHATSAPP_FROM"),
        )
    }

    fn from_parts(
        account_sid: Option<String>,
        auth_token: Option<String>,
        to_number: Option<String>,
        from_number: Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        match (account_sid, auth_token, to_number) {
            (Some(sid), Some(token), Some(to)) => Ok(Some(Self {
                account_sid: sid,
                auth_token: SecretString::from(token),
                from_number: from_number.unwrap_or_else(|| DEFAULT_WHATSAPP_FROM.to_string()),
                to_number: to,
            })),
            (None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "TWILIO_*".to_string(),
                "TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_WHATSAPP_TO must be set together"
                    .to_string(),
            )),
        }
    }
}

/// Build the store configuration for the selected backend.
///
/// Credentials for the inactive backend are never read, so a WooCommerce
/// deployment does not need any `SHOPIFY_*` variables and vice versa.
fn store_config_from_env() -> Result<StoreConfig, ConfigError> {
    store_config_from_lookup(get_optional_env)
}

fn store_config_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<StoreConfig, ConfigError> {
    let require =
        |key: &str| lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

    let backend = require("STORE_BACKEND")?
        .parse::<BackendKind>()
        .map_err(|e| ConfigError::InvalidEnvVar("STORE_BACKEND".to_string(), e.to_string()))?;

    let (woocommerce, shopify) = match backend {
        BackendKind::WooCommerce => {
            let creds = WooCommerceConfig {
                url: require("WOOCOMMERCE_URL")?,
                consumer_key: require("WOOCOMMERCE_CONSUMER_KEY")?,
                consumer_secret: SecretString::from(require("WOOCOMMERCE_CONSUMER_SECRET")?),
            };
            (Some(creds), None)
        }
        BackendKind::Shopify => {
            let creds = ShopifyConfig {
                shop: require("SHOPIFY_SHOP")?,
                access_token: SecretString::from(require("SHOPIFY_ACCESS_TOKEN")?),
                api_version: lookup("SHOPIFY_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_SHOPIFY_API_VERSION.to_string()),
            };
            (None, Some(creds))
        }
    };

    Ok(StoreConfig {
        backend,
        woocommerce,
        shopify,
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = GatewayConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            store: StoreConfig {
                backend: BackendKind::WooCommerce,
                woocommerce: Some(WooCommerceConfig {
                    url: "https://shop.example.com".to_string(),
                    consumer_key: "ck_test".to_string(),
                    consumer_secret: SecretString::from("cs_test"),
                }),
                shopify: None,
            },
            gemini: None,
            twilio: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_gemini_config_debug_redacts_api_key() {
        let config = GeminiConfig {
            api_key: SecretString::from("AIza-super-secret-key"),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains(DEFAULT_GEMINI_MODEL));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("AIza-super-secret-key"));
    }

    #[test]
    fn test_twilio_config_debug_redacts_auth_token() {
        let config = TwilioConfig {
            account_sid: "AC00000000".to_string(),
            auth_token: SecretString::from("super-secret-token"),
            from_number: DEFAULT_WHATSAPP_FROM.to_string(),
            to_number: "whatsapp:+15551234567".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("AC00000000"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_default_whatsapp_from_is_the_sandbox_number() {
        assert_eq!(DEFAULT_WHATSAPP_FROM, "whatsapp:+14155238886");
    }

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_missing_required_var_is_an_error() {
        let err = store_config_from_lookup(lookup_from(&[("STORE_BACKEND", "woocommerce")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: WOOCOMMERCE_URL"
        );
    }

    #[test]
    fn test_unknown_backend_is_an_error() {
        let err = store_config_from_lookup(lookup_from(&[("STORE_BACKEND", "magento")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
        assert!(err.to_string().contains("magento"));
    }

    #[test]
    fn test_inactive_backend_credentials_are_not_required() {
        let config = store_config_from_lookup(lookup_from(&[
            ("STORE_BACKEND", "shopify"),
            ("SHOPIFY_SHOP", "test.myshopify.com"),
            ("SHOPIFY_ACCESS_TOKEN", "shpat_test"),
        ]))
        .unwrap();
        assert_eq!(config.backend, BackendKind::Shopify);
        assert!(config.woocommerce.is_none());
        let shopify = config.shopify.unwrap();
        assert_eq!(shopify.api_version, DEFAULT_SHOPIFY_API_VERSION);
    }

    #[test]
    fn test_twilio_vars_must_be_set_together() {
        let missing_token = TwilioConfig::from_parts(
            Some("AC00000000".to_string()),
            None,
            Some("whatsapp:+15551234567".to_string()),
            None,
        );
        assert!(matches!(
            missing_token,
            Err(ConfigError::InvalidEnvVar(_, _))
        ));

        let none = TwilioConfig::from_parts(None, None, None, None).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_twilio_from_defaults_to_sandbox() {
        let config = TwilioConfig::from_parts(
            Some("AC00000000".to_string()),
            Some("token".to_string()),
            Some("whatsapp:+15551234567".to_string()),
            None,
        )
        .unwrap()
        .unwrap();
        assert_eq!(config.from_number, DEFAULT_WHATSAPP_FROM);
    }
}
