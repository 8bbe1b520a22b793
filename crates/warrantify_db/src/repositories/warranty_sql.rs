//! SQL implementation of the warranty repository

use crate::error::DbError;
use crate::repositories::warranty::{WarrantyItem, WarrantyRepository};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the warranty repository
#[derive(Debug, Clone)]
pub struct SqlWarrantyRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlWarrantyRepository {
    /// Create a new SQL warranty repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_warranty(row: &AnyRow) -> WarrantyItem {
    WarrantyItem {
        id: row.try_get("id").unwrap_or_default(),
        owner_id: row.try_get("owner_id").unwrap_or_default(),
        product_name: row.try_get("product_name").unwrap_or_default(),
        retailer: row.try_get("retailer").ok(),
        purchase_date: row.try_get("purchase_date").ok(),
        warranty_period: row.try_get("warranty_period").ok(),
        expiry_date: row.try_get("expiry_date").ok(),
    }
}

impl WarrantyRepository for SqlWarrantyRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing warranty schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS warranties (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                product_name TEXT NOT NULL,
                retailer TEXT,
                purchase_date TEXT,
                warranty_period TEXT,
                expiry_date TEXT
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Warranty schema initialized successfully");
        Ok(())
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<WarrantyItem>, DbError> {
        debug!("Finding warranties for owner: {}", owner_id);

        let query = r#"
            SELECT id, owner_id, product_name, retailer, purchase_date, warranty_period, expiry_date
            FROM warranties
            WHERE owner_id = $1
        "#;

        let rows = sqlx::query(query)
            .bind(owner_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find warranties: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_warranty).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<WarrantyItem>, DbError> {
        debug!("Finding warranty: {}", id);

        let query = r#"
            SELECT id, owner_id, product_name, retailer, purchase_date, warranty_period, expiry_date
            FROM warranties
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find warranty: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.as_ref().map(row_to_warranty))
    }
}
