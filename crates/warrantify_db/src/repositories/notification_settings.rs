//! Repository for per-tenant notification settings
//!
//! One row per tenant, created with defaults the first time the tenant is
//! touched. Tenants change their settings through the settings API; the alert
//! scheduler reads them and updates only the last-notified timestamp.

use crate::error::DbError;
use chrono::{DateTime, Utc};

// Re-export the canonical record for convenience
pub use warrantify_common::models::TenantSettings;

/// Repository for per-tenant notification settings.
pub trait NotificationSettingsRepository {
    /// Initialize the database schema
    ///
    /// Creates the notification_settings table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Create the settings row with defaults if the tenant has none yet.
    ///
    /// Idempotent; an existing row is left untouched.
    fn ensure_defaults(
        &self,
        tenant_id: &str,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find the settings for one tenant
    fn find_by_tenant(
        &self,
        tenant_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<TenantSettings>, DbError>> + Send;

    /// Find all tenants with at least one notification channel enabled
    fn find_notifiable(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<TenantSettings>, DbError>> + Send;

    /// Replace a tenant's settings
    ///
    /// # Arguments
    ///
    /// * `settings` - The settings to store, keyed by `tenant_id`
    fn update_settings(
        &self,
        settings: &TenantSettings,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Record when a notification batch was last attempted for the tenant.
    ///
    /// Idempotent, last-write-wins.
    fn touch_last_notified(
        &self,
        tenant_id: &str,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
}
