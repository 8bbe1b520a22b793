//! SQL implementation of the device token repository

use crate::error::DbError;
use crate::repositories::device_token::{DeviceToken, DeviceTokenRepository};
use crate::repositories::notification_settings_sql::parse_timestamp;
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the device token repository
#[derive(Debug, Clone)]
pub struct SqlDeviceTokenRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlDeviceTokenRepository {
    /// Create a new SQL device token repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_device_token(row: &AnyRow) -> DeviceToken {
    DeviceToken {
        tenant_id: row.try_get("tenant_id").unwrap_or_default(),
        token: row.try_get("token").unwrap_or_default(),
        platform: row.try_get("platform").unwrap_or_default(),
        last_used: row
            .try_get::<String, _>("last_used")
            .ok()
            .as_deref()
            .and_then(parse_timestamp),
    }
}

impl DeviceTokenRepository for SqlDeviceTokenRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing device token schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS device_tokens (
                tenant_id TEXT NOT NULL,
                token TEXT NOT NULL PRIMARY KEY,
                platform TEXT NOT NULL,
                last_used TEXT
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Device token schema initialized successfully");
        Ok(())
    }

    async fn upsert(&self, token: DeviceToken) -> Result<DeviceToken, DbError> {
        debug!("Registering device token for tenant: {}", token.tenant_id);

        let existing = self.find_by_token(&token.token).await?;
        let last_used = token
            .last_used
            .unwrap_or_else(chrono::Utc::now)
            .to_rfc3339();

        if existing.is_some() {
            // Refresh the existing registration in place
            debug!("Updating existing registration for token");

            let query = r#"
                UPDATE device_tokens
                SET tenant_id = $1, platform = $2, last_used = $3
                WHERE token = $4
            "#;

            sqlx::query(query)
                .bind(&token.tenant_id)
                .bind(&token.platform)
                .bind(&last_used)
                .bind(&token.token)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to update device token: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            info!("Device token updated successfully");
        } else {
            debug!("Creating new registration for tenant: {}", token.tenant_id);

            let query = r#"
                INSERT INTO device_tokens (tenant_id, token, platform, last_used)
                VALUES ($1, $2, $3, $4)
            "#;

            sqlx::query(query)
                .bind(&token.tenant_id)
                .bind(&token.token)
                .bind(&token.platform)
                .bind(&last_used)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to insert device token: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            info!("Device token registered successfully");
        }

        self.find_by_token(&token.token)
            .await?
            .ok_or_else(|| DbError::QueryError("device token vanished after upsert".to_string()))
    }

    async fn find_by_tenant(&self, tenant_id: &str) -> Result<Vec<DeviceToken>, DbError> {
        debug!("Finding device tokens for tenant: {}", tenant_id);

        let query = r#"
            SELECT tenant_id, token, platform, last_used
            FROM device_tokens
            WHERE tenant_id = $1
            ORDER BY last_used DESC
        "#;

        let rows = sqlx::query(query)
            .bind(tenant_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find device tokens: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_device_token).collect())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<DeviceToken>, DbError> {
        debug!("Finding device token");

        let query = r#"
            SELECT tenant_id, token, platform, last_used
            FROM device_tokens
            WHERE token = $1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find device token: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.as_ref().map(row_to_device_token))
    }
}
