//! Database integration for Warrantify
//!
//! This crate provides a database client that is designed to be database
//! agnostic, using SQLx as the underlying database library. SQLite is the
//! default backend; PostgreSQL is available behind a feature flag.
//!
//! # Features
//!
//! - Database agnostic design with connection pooling
//! - Repositories for warranties, notification settings and device tokens
//! - A [`store::SqlAlertStore`] adapter the alert scheduler consumes through
//!   the `AlertStore` trait
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! warrantify-db = { version = "0.1.0" }
//! ```
//!
//! To use the PostgreSQL backend:
//!
//! ```toml
//! [dependencies]
//! warrantify-db = { version = "0.1.0", features = ["postgres"] }
//! ```

pub mod client;
pub mod error;
pub mod repositories;
pub mod store;

// Register the SQLite driver when the crate is loaded
#[cfg(feature = "sqlite")]
mod sqlite_driver {
    // This import ensures the SQLite driver is linked and registered
    #[allow(unused_imports)]
    use sqlx::sqlite::SqlitePoolOptions as _;
}

// Re-export the client and error types for ease of use
pub use client::DbClient;
pub use error::DbError;

// Re-export the repositories module components for ease of use
pub use repositories::{
    DeviceToken, DeviceTokenRepository, NotificationSettingsRepository, SqlDeviceTokenRepository,
    SqlNotificationSettingsRepository, SqlWarrantyRepository, TenantSettings, WarrantyItem,
    WarrantyRepository,
};

// Re-export the alert store adapter
pub use store::SqlAlertStore;
