// --- File: crates/warrantify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Canonical shared records
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    conflict, config_error, external_service_error, internal_error, not_found, validation_error,
    Context, HttpStatusCode, WarrantifyError,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, get, post, HTTP_CLIENT},
    handle_json_result, map_json_error, IntoHttpResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

// Re-export feature flag handling utilities for easier access
pub use features::{is_database_enabled, is_email_enabled, is_feature_enabled, is_push_enabled};

// This crate provides common functionality shared across the application:
// canonical models, service traits, error handling, logging and HTTP utilities.
