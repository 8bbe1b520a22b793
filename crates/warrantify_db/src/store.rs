//! SQL-backed implementation of the alert store.
//!
//! This adapter is the only place store rows are translated into the
//! canonical records the alert engine works with; column naming and row
//! decoding quirks stay behind this boundary.

use crate::error::DbError;
use crate::repositories::{
    DeviceTokenRepository, NotificationSettingsRepository, SqlDeviceTokenRepository,
    SqlNotificationSettingsRepository, SqlWarrantyRepository, WarrantyRepository,
};
use crate::DbClient;
use chrono::{DateTime, Utc};
use warrantify_common::models::{DeviceToken, TenantSettings, WarrantyItem};
use warrantify_common::services::{AlertStore, BoxFuture};

/// SQL-backed [`AlertStore`] over the Warrantify repositories.
#[derive(Debug, Clone)]
pub struct SqlAlertStore {
    warranties: SqlWarrantyRepository,
    settings: SqlNotificationSettingsRepository,
    tokens: SqlDeviceTokenRepository,
}

impl SqlAlertStore {
    /// Create a new SQL alert store over one database client.
    pub fn new(db_client: DbClient) -> Self {
        Self {
            warranties: SqlWarrantyRepository::new(db_client.clone()),
            settings: SqlNotificationSettingsRepository::new(db_client.clone()),
            tokens: SqlDeviceTokenRepository::new(db_client),
        }
    }

    /// Initialize the schema of every table the alert engine reads.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        self.warranties.init_schema().await?;
        self.settings.init_schema().await?;
        self.tokens.init_schema().await?;
        Ok(())
    }

    /// The underlying device token repository, for the registration path.
    pub fn device_tokens(&self) -> &SqlDeviceTokenRepository {
        &self.tokens
    }

    /// The underlying notification settings repository.
    pub fn settings(&self) -> &SqlNotificationSettingsRepository {
        &self.settings
    }
}

impl AlertStore for SqlAlertStore {
    type Error = DbError;

    fn list_notifiable_tenants(&self) -> BoxFuture<'_, Vec<TenantSettings>, Self::Error> {
        Box::pin(async move { self.settings.find_notifiable().await })
    }

    fn warranties_for_tenant(
        &self,
        tenant_id: &str,
    ) -> BoxFuture<'_, Vec<WarrantyItem>, Self::Error> {
        let tenant_id = tenant_id.to_string();
        Box::pin(async move { self.warranties.find_by_owner(&tenant_id).await })
    }

    fn device_tokens_for_tenant(
        &self,
        tenant_id: &str,
    ) -> BoxFuture<'_, Vec<DeviceToken>, Self::Error> {
        let tenant_id = tenant_id.to_string();
        Box::pin(async move { self.tokens.find_by_tenant(&tenant_id).await })
    }

    fn mark_notified(&self, tenant_id: &str, at: DateTime<Utc>) -> BoxFuture<'_, (), Self::Error> {
        let tenant_id = tenant_id.to_string();
        Box::pin(async move { self.settings.touch_last_notified(&tenant_id, at).await })
    }
}
