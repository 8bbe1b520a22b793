//! Firebase Cloud Messaging client module
//!
//! This module provides a client for the Firebase Cloud Messaging (FCM) HTTP
//! v1 API. The v1 API delivers to one registration token per request, so
//! multicast is performed by the channel service on top of this client.

use crate::auth::get_fcm_auth_token;
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use warrantify_common::http::client::HTTP_CLIENT;
use warrantify_config::FirebaseConfig;
use warrantify_db::DbError;

/// Errors that can occur when interacting with the push provider
#[derive(Error, Debug)]
pub enum PushError {
    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to the FCM API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by the FCM API
    #[error("FCM API error: {0}")]
    ApiError(String),

    /// The provider reported the target token as invalid or unregistered.
    ///
    /// Surfaced so callers can flag the token; cleanup policy is owned by
    /// the token lifecycle, not this client.
    #[error("Unregistered device token: {0}")]
    Unregistered(String),

    /// The request was rejected before being sent
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Error from the device token store
    #[error("Device token store error: {0}")]
    DbError(#[from] DbError),
}

/// A message to be sent via Firebase Cloud Messaging
///
/// This is the top-level structure that wraps a Message object
/// according to the FCM HTTP v1 API format.
#[derive(Debug, Serialize)]
pub struct FcmMessage {
    /// The message payload
    pub message: Message,
}

/// The message payload for Firebase Cloud Messaging
#[derive(Debug, Serialize)]
pub struct Message {
    /// Registration token of the target device
    pub token: String,

    /// The notification to be displayed on the device
    pub notification: Notification,

    /// Custom key-value data delivered alongside the notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, String>>,
}

/// The notification to be displayed on the user's device
#[derive(Debug, Serialize)]
pub struct Notification {
    /// The title of the notification
    pub title: String,

    /// The body text of the notification
    pub body: String,
}

/// Response from the Firebase Cloud Messaging API
#[derive(Debug, Deserialize)]
pub struct FcmResponse {
    /// Message id in the form "projects/{project_id}/messages/{message_id}"
    pub name: String,
}

/// Client for the Firebase Cloud Messaging HTTP v1 API.
pub struct FcmClient {
    /// Configuration for Firebase, including project ID and service account key path
    config: FirebaseConfig,
}

impl FcmClient {
    /// Creates a new FCM client with the given configuration
    pub fn new(config: FirebaseConfig) -> Self {
        Self { config }
    }

    /// The v1 send endpoint for the configured project.
    pub(crate) fn endpoint(&self) -> Result<String, PushError> {
        let project_id = self.config.project_id.as_deref().ok_or_else(|| {
            PushError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })?;

        Ok(format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            project_id
        ))
    }

    /// An OAuth2 bearer token for the messaging scope.
    pub(crate) async fn bearer(&self) -> Result<String, PushError> {
        get_fcm_auth_token(&self.config)
            .await
            .map_err(|e| PushError::AuthError(e.to_string()))
    }

    /// Sends one push message via Firebase Cloud Messaging.
    ///
    /// # Returns
    ///
    /// The provider-assigned message id on success.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Unregistered`] when the provider reports the
    /// token as stale (HTTP 404 / `UNREGISTERED`), so callers can separate
    /// dead tokens from transport failures. Other provider rejections come
    /// back as [`PushError::ApiError`] with the response body.
    pub async fn send_message(&self, message: FcmMessage) -> Result<String, PushError> {
        let url = self.endpoint()?;
        let token = self.bearer().await?;
        self.send_with_bearer(&url, &token, message).await
    }

    // Separated from send_message so tests can target a mock endpoint
    // without a service account.
    pub(crate) async fn send_with_bearer(
        &self,
        url: &str,
        bearer: &str,
        message: FcmMessage,
    ) -> Result<String, PushError> {
        let device_token = message.message.token.clone();

        let response = HTTP_CLIENT
            .post(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            if status == StatusCode::NOT_FOUND || error_text.contains("UNREGISTERED") {
                return Err(PushError::Unregistered(device_token));
            }
            return Err(PushError::ApiError(error_text));
        }

        let fcm_response: FcmResponse = response.json().await?;
        Ok(fcm_response.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> FcmClient {
        FcmClient::new(FirebaseConfig {
            project_id: Some("warrantify-test".to_string()),
            key_path: None,
        })
    }

    fn alert(token: &str) -> FcmMessage {
        FcmMessage {
            message: Message {
                token: token.to_string(),
                notification: Notification {
                    title: "Warranty expiring soon".to_string(),
                    body: "Kettle warranty expires in 7 days".to_string(),
                },
                data: None,
            },
        }
    }

    #[tokio::test]
    async fn successful_send_returns_the_message_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer fake-bearer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "projects/warrantify-test/messages/42"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let name = client()
            .send_with_bearer(&server.uri(), "fake-bearer", alert("tok-1"))
            .await
            .expect("send should succeed");

        assert_eq!(name, "projects/warrantify-test/messages/42");
    }

    #[tokio::test]
    async fn stale_token_maps_to_unregistered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"error":{"status":"NOT_FOUND","message":"UNREGISTERED"}}"#),
            )
            .mount(&server)
            .await;

        let err = client()
            .send_with_bearer(&server.uri(), "fake-bearer", alert("tok-stale"))
            .await
            .expect_err("stale token should fail");

        match err {
            PushError::Unregistered(token) => assert_eq!(token, "tok-stale"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn other_provider_errors_surface_the_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let err = client()
            .send_with_bearer(&server.uri(), "fake-bearer", alert("tok-1"))
            .await
            .expect_err("provider failure should surface");

        assert!(matches!(err, PushError::ApiError(_)));
    }
}
