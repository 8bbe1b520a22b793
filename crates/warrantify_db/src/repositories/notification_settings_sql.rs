//! SQL implementation of the notification settings repository

use crate::error::DbError;
use crate::repositories::notification_settings::{
    NotificationSettingsRepository, TenantSettings,
};
use crate::DbClient;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the notification settings repository
#[derive(Debug, Clone)]
pub struct SqlNotificationSettingsRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlNotificationSettingsRepository {
    /// Create a new SQL notification settings repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

// TIMESTAMP columns come back as text under sqlx::Any; accept both the
// RFC 3339 form this crate writes and the "YYYY-MM-DD HH:MM:SS" form
// CURRENT_TIMESTAMP produces.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn row_to_settings(row: &AnyRow) -> TenantSettings {
    TenantSettings {
        tenant_id: row.try_get("tenant_id").unwrap_or_default(),
        contact_email: row.try_get("contact_email").ok(),
        email_enabled: row
            .try_get::<i64, _>("email_enabled")
            .map(|v| v != 0)
            .unwrap_or(false),
        push_enabled: row
            .try_get::<i64, _>("push_enabled")
            .map(|v| v != 0)
            .unwrap_or(false),
        alert_threshold_days: row
            .try_get::<i64, _>("alert_threshold_days")
            .ok()
            .and_then(|v| u16::try_from(v).ok()),
        last_notification_sent: row
            .try_get::<String, _>("last_notification_sent")
            .ok()
            .as_deref()
            .and_then(parse_timestamp),
    }
}

const SETTINGS_COLUMNS: &str = "tenant_id, contact_email, email_enabled, push_enabled, alert_threshold_days, last_notification_sent";

impl NotificationSettingsRepository for SqlNotificationSettingsRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing notification settings schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS notification_settings (
                tenant_id TEXT PRIMARY KEY,
                contact_email TEXT,
                email_enabled INTEGER NOT NULL DEFAULT 1,
                push_enabled INTEGER NOT NULL DEFAULT 0,
                alert_threshold_days INTEGER NOT NULL DEFAULT 30,
                last_notification_sent TEXT
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Notification settings schema initialized successfully");
        Ok(())
    }

    async fn ensure_defaults(&self, tenant_id: &str) -> Result<(), DbError> {
        debug!("Ensuring default settings for tenant: {}", tenant_id);

        let query = r#"
            INSERT INTO notification_settings (tenant_id)
            VALUES ($1)
            ON CONFLICT (tenant_id) DO NOTHING
        "#;

        sqlx::query(query)
            .bind(tenant_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to ensure default settings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(())
    }

    async fn find_by_tenant(&self, tenant_id: &str) -> Result<Option<TenantSettings>, DbError> {
        debug!("Finding notification settings for tenant: {}", tenant_id);

        let query = format!(
            "SELECT {} FROM notification_settings WHERE tenant_id = $1",
            SETTINGS_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(tenant_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find notification settings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.as_ref().map(row_to_settings))
    }

    async fn find_notifiable(&self) -> Result<Vec<TenantSettings>, DbError> {
        debug!("Finding tenants with a notification channel enabled");

        let query = format!(
            "SELECT {} FROM notification_settings WHERE email_enabled = 1 OR push_enabled = 1",
            SETTINGS_COLUMNS
        );

        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find notifiable tenants: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_settings).collect())
    }

    async fn update_settings(&self, settings: &TenantSettings) -> Result<(), DbError> {
        debug!("Updating notification settings for tenant: {}", settings.tenant_id);

        let query = r#"
            UPDATE notification_settings
            SET contact_email = $1, email_enabled = $2, push_enabled = $3, alert_threshold_days = $4
            WHERE tenant_id = $5
        "#;

        sqlx::query(query)
            .bind(settings.contact_email.as_deref())
            .bind(i64::from(settings.email_enabled))
            .bind(i64::from(settings.push_enabled))
            .bind(i64::from(settings.effective_threshold()))
            .bind(&settings.tenant_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update notification settings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        info!("Notification settings updated for tenant: {}", settings.tenant_id);
        Ok(())
    }

    async fn touch_last_notified(&self, tenant_id: &str, at: DateTime<Utc>) -> Result<(), DbError> {
        debug!("Updating last notification timestamp for tenant: {}", tenant_id);

        let query = r#"
            UPDATE notification_settings
            SET last_notification_sent = $1
            WHERE tenant_id = $2
        "#;

        sqlx::query(query)
            .bind(at.to_rfc3339())
            .bind(tenant_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update last notification timestamp: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(())
    }
}
