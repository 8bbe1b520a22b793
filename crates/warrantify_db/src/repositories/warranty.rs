//! Repository for warranty rows
//!
//! Warranties are created and mutated by the CRUD API, which lives outside
//! this core; the alert engine only ever reads them, scoped to one owning
//! tenant at a time.

use crate::error::DbError;

// Re-export the canonical record for convenience
pub use warrantify_common::models::WarrantyItem;

/// Read-only repository over the warranties table.
pub trait WarrantyRepository {
    /// Initialize the database schema
    ///
    /// Creates the warranties table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find all warranties owned by one tenant
    ///
    /// # Arguments
    ///
    /// * `owner_id` - The owning tenant's ID
    ///
    /// # Returns
    ///
    /// The tenant's warranties in insertion order
    fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<WarrantyItem>, DbError>> + Send;

    /// Find a warranty by its ID
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<WarrantyItem>, DbError>> + Send;
}
