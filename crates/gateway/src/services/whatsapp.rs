//! Twilio WhatsApp client.
//!
//! Sends notification messages after chat commands that change the store.
//! Delivery is best effort: callers log failures and never fail the
//! originating request because a notification did not go out.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

use crate::config::TwilioConfig;

const TWILIO_API_BASE: &str = "https://api.twilio.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors from the Twilio API client.
#[derive(Debug, Error)]
pub enum WhatsAppError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Twilio API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

/// Client for Twilio's Messages endpoint.
#[derive(Clone)]
pub struct WhatsAppClient {
    inner: Arc<WhatsAppClientInner>,
}

struct WhatsAppClientInner {
    client: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: SecretString,
    from_number: String,
    to_number: String,
}

impl WhatsAppClient {
    /// Create a new client against the public Twilio API.
    ///
    /// # Errors
    ///
    /// Returns [`WhatsAppError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &TwilioConfig) -> Result<Self, WhatsAppError> {
        Self::with_base_url(TWILIO_API_BASE, config)
    }

    /// Create a client against a custom base URL (for tests).
    ///
    /// # Errors
    ///
    /// Returns [`WhatsAppError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn with_base_url(base_url: &str, config: &TwilioConfig) -> Result<Self, WhatsAppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            inner: Arc::new(WhatsAppClientInner {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
                account_sid: config.account_sid.clone(),
                auth_token: config.auth_token.clone(),
                from_number: config.from_number.clone(),
                to_number: config.to_number.clone(),
            }),
        })
    }

    /// Send a WhatsApp message to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns [`WhatsAppError::Api`] on a non-success status.
    #[instrument(skip(self, body))]
    pub async fn notify(&self, body: &str) -> Result<(), WhatsAppError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.inner.base_url, self.inner.account_sid
        );
        let form = [
            ("From", self.inner.from_number.as_str()),
            ("To", self.inner.to_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .inner
            .client
            .post(&url)
            .basic_auth(
                &self.inner.account_sid,
                Some(self.inner.auth_token.expose_secret()),
            )
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WhatsAppError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for WhatsAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClient")
            .field("account_sid", &self.inner.account_sid)
            .field("to_number", &self.inner.to_number)
            .finish_non_exhaustive()
    }
}
