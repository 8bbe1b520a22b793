//! Repository for push device tokens
//!
//! This module provides a generic interface for storing and retrieving the
//! push-capable endpoints registered for each tenant. Registration is an
//! idempotent upsert keyed by the token itself; the alert engine reads tokens
//! and never deletes them (token lifecycle is owned externally).

use crate::error::DbError;

// Re-export the canonical record for convenience
pub use warrantify_common::models::DeviceToken;

/// Repository for push device tokens.
pub trait DeviceTokenRepository {
    /// Initialize the database schema
    ///
    /// Creates the device_tokens table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Register a device token
    ///
    /// If the token already exists, its tenant, platform and last-used
    /// timestamp are updated in place rather than inserting a duplicate row.
    ///
    /// # Arguments
    ///
    /// * `token` - The device token to store
    ///
    /// # Returns
    ///
    /// The stored device token with its timestamp set
    fn upsert(
        &self,
        token: DeviceToken,
    ) -> impl std::future::Future<Output = Result<DeviceToken, DbError>> + Send;

    /// Find all device tokens for a tenant, most recently used first
    fn find_by_tenant(
        &self,
        tenant_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<DeviceToken>, DbError>> + Send;

    /// Find a device token by its value
    fn find_by_token(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<DeviceToken>, DbError>> + Send;
}
