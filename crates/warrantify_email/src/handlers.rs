//! HTTP handlers for the email channel
//!
//! One operator-facing endpoint: sending a test message so a tenant can
//! verify their provider configuration before relying on expiry digests.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::client::EmailError;
use crate::service::EmailDispatchService;
use warrantify_common::services::EmailChannel as _;

/// Shared state for email handlers
#[derive(Clone)]
pub struct EmailState {
    /// The channel used to send messages
    pub channel: Arc<EmailDispatchService>,
}

/// Request body for sending a test email
#[derive(Debug, Deserialize)]
pub struct TestEmailRequest {
    /// Address to deliver the test message to
    pub to: String,
}

/// Response body for the test email endpoint
#[derive(Debug, Serialize)]
pub struct TestEmailResponse {
    /// Whether the message was accepted by the provider
    pub success: bool,

    /// Provider-assigned id of the message, when accepted
    pub message_id: Option<String>,

    /// Error message if the send failed
    pub error: Option<String>,
}

/// Handler for sending a test email.
#[axum::debug_handler]
pub async fn send_test_email_handler(
    State(state): State<Arc<EmailState>>,
    Json(payload): Json<TestEmailRequest>,
) -> Response {
    debug!("Sending test email to {}", payload.to);

    match state.channel.send_test_message(&payload.to).await {
        Ok(receipt) => {
            info!("Test email accepted: {}", receipt.message_id);
            Json(TestEmailResponse {
                success: true,
                message_id: Some(receipt.message_id),
                error: None,
            })
            .into_response()
        }
        Err(err) => {
            error!("Failed to send test email: {:?}", err);
            let status = match &err {
                EmailError::InvalidMessage(_) => StatusCode::BAD_REQUEST,
                EmailError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                EmailError::RequestError(_) => StatusCode::BAD_GATEWAY,
                EmailError::ApiError(_) => StatusCode::BAD_GATEWAY,
            };

            (
                status,
                Json(TestEmailResponse {
                    success: false,
                    message_id: None,
                    error: Some(err.to_string()),
                }),
            )
                .into_response()
        }
    }
}
