//! HTTP client for the transactional mail provider
//!
//! The provider exposes a single JSON send endpoint authenticated with a
//! bearer token. One call delivers one message; retry policy, if any, lives
//! with the provider, not here.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use warrantify_common::http::client::HTTP_CLIENT;
use warrantify_config::EmailConfig;

/// Errors that can occur when talking to the mail provider
#[derive(Error, Debug)]
pub enum EmailError {
    /// Error during HTTP request to the provider
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// The request was rejected before being sent
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Error returned by the provider API
    #[error("Mail provider error: {0}")]
    ApiError(String),
}

/// One outbound message in the provider's wire format.
#[derive(Debug, Serialize)]
pub struct OutboundEmail {
    /// Sender address.
    pub from: Address,
    /// Recipient address.
    pub to: String,
    /// Message subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text alternative.
    pub text: String,
}

/// A sender address with an optional display name.
#[derive(Debug, Serialize)]
pub struct Address {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response from the provider after a successful send.
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    /// Provider-assigned message id.
    pub id: String,
    /// Provider-reported status, e.g. "queued".
    #[serde(default)]
    pub status: String,
}

/// Client for the transactional mail provider's send API.
#[derive(Debug, Clone)]
pub struct MailClient {
    /// Provider configuration, including endpoint and credentials
    config: EmailConfig,
}

impl MailClient {
    /// Creates a new mail client with the given configuration
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// The configured sender address.
    pub fn sender(&self) -> Address {
        Address {
            email: self.config.from_address.clone(),
            name: self.config.from_name.clone(),
        }
    }

    /// Deliver one message through the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient is empty, the HTTP request fails
    /// (including the shared client's timeout) or the provider responds with
    /// a non-success status. The provider's error body is carried in
    /// [`EmailError::ApiError`] so operators can see the rejection reason.
    pub async fn send(&self, message: OutboundEmail) -> Result<SendResponse, EmailError> {
        if message.to.trim().is_empty() {
            return Err(EmailError::InvalidMessage(
                "recipient address is empty".to_string(),
            ));
        }
        if self.config.api_key.is_empty() {
            return Err(EmailError::ConfigError(
                "mail provider API key is not set".to_string(),
            ));
        }

        let response = HTTP_CLIENT
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Mail provider returned {}: {}", status, body);
            return Err(EmailError::ApiError(format!("{}: {}", status, body)));
        }

        let send_response: SendResponse = response.json().await?;
        Ok(send_response)
    }
}
