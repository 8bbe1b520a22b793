//! HTTP handlers for push device registration
//!
//! Client apps call the registration endpoint whenever they obtain or refresh
//! an FCM token. Registration is an idempotent upsert, so retries and token
//! refreshes are safe.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::client::PushError;
use crate::registry::DeviceTokenRegistry;

/// Shared state for push handlers
#[derive(Clone)]
pub struct PushState {
    /// The device token registry
    pub registry: Arc<DeviceTokenRegistry>,
}

/// Request body for registering a device
#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    /// The tenant the device belongs to
    pub tenant_id: String,

    /// The FCM registration token
    pub token: String,

    /// Client platform, e.g. "android" or "ios"
    pub platform: String,
}

/// Response body for the register device endpoint
#[derive(Debug, Serialize)]
pub struct RegisterDeviceResponse {
    /// Whether the device was registered successfully
    pub success: bool,

    /// The tenant associated with the registration
    pub tenant_id: Option<String>,

    /// Error message if registration failed
    pub error: Option<String>,
}

/// Handler for registering a device for push notifications.
#[axum::debug_handler]
pub async fn register_device_handler(
    State(state): State<Arc<PushState>>,
    Json(payload): Json<RegisterDeviceRequest>,
) -> Response {
    debug!("Registering device for tenant: {}", payload.tenant_id);

    if payload.token.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RegisterDeviceResponse {
                success: false,
                tenant_id: Some(payload.tenant_id),
                error: Some("token must not be empty".to_string()),
            }),
        )
            .into_response();
    }

    match state
        .registry
        .register(payload.tenant_id.clone(), payload.token, payload.platform)
        .await
    {
        Ok(registration) => {
            info!(
                "Successfully registered device for tenant: {}",
                registration.tenant_id
            );
            Json(RegisterDeviceResponse {
                success: true,
                tenant_id: Some(registration.tenant_id),
                error: None,
            })
            .into_response()
        }
        Err(err) => {
            error!("Failed to register device: {:?}", err);
            let status = match &err {
                PushError::DbError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                PushError::InvalidMessage(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };

            (
                status,
                Json(RegisterDeviceResponse {
                    success: false,
                    tenant_id: Some(payload.tenant_id),
                    error: Some(err.to_string()),
                }),
            )
                .into_response()
        }
    }
}
