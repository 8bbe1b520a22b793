//! Registry of push-capable device endpoints
//!
//! This module wraps the device token repository from warrantify_db with the
//! registration semantics clients rely on: registering is an idempotent
//! upsert keyed by the token, and reads come back most-recently-used first.
//! Tokens are never deleted here, even when the provider reports them stale;
//! their lifecycle is owned outside this core.

use crate::client::PushError;
use warrantify_common::models::DeviceToken;
use warrantify_db::{DeviceTokenRepository as _, SqlDeviceTokenRepository};

/// Registry of push endpoints per tenant.
#[derive(Debug, Clone)]
pub struct DeviceTokenRegistry {
    inner: SqlDeviceTokenRepository,
}

impl DeviceTokenRegistry {
    /// Create a new registry over the SQL device token repository.
    pub fn new(inner: SqlDeviceTokenRepository) -> Self {
        Self { inner }
    }

    /// Initialize the backing schema.
    pub async fn init_schema(&self) -> Result<(), PushError> {
        self.inner.init_schema().await.map_err(PushError::DbError)
    }

    /// Register a device endpoint.
    ///
    /// An existing token is refreshed in place (platform and last-used
    /// timestamp) rather than inserted again.
    pub async fn register(
        &self,
        tenant_id: String,
        token: String,
        platform: String,
    ) -> Result<DeviceToken, PushError> {
        let registration = DeviceToken::new(tenant_id, token, platform);
        self.inner
            .upsert(registration)
            .await
            .map_err(PushError::DbError)
    }

    /// All endpoints registered for a tenant, most recently used first.
    pub async fn tokens_for_tenant(&self, tenant_id: &str) -> Result<Vec<DeviceToken>, PushError> {
        self.inner
            .find_by_tenant(tenant_id)
            .await
            .map_err(PushError::DbError)
    }
}
