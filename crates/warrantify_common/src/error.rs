// --- File: crates/warrantify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Warrantify errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for WarrantifyError.
#[derive(Error, Debug)]
pub enum WarrantifyError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., an alert run already in flight)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for WarrantifyError {
    fn status_code(&self) -> u16 {
        match self {
            WarrantifyError::HttpError(_) => 500,
            WarrantifyError::ParseError(_) => 400,
            WarrantifyError::ConfigError(_) => 500,
            WarrantifyError::ValidationError(_) => 400,
            WarrantifyError::DatabaseError(_) => 500,
            WarrantifyError::ExternalServiceError { .. } => 502,
            WarrantifyError::ConflictError(_) => 409,
            WarrantifyError::NotFoundError(_) => 404,
            WarrantifyError::TimeoutError(_) => 504,
            WarrantifyError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
///
/// This trait can be implemented by error types to provide a consistent way
/// to add context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, WarrantifyError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, WarrantifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, WarrantifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| WarrantifyError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, WarrantifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| WarrantifyError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for WarrantifyError {
    fn from(err: reqwest::Error) -> Self {
        WarrantifyError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for WarrantifyError {
    fn from(err: serde_json::Error) -> Self {
        WarrantifyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for WarrantifyError {
    fn from(err: std::io::Error) -> Self {
        WarrantifyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> WarrantifyError {
    WarrantifyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> WarrantifyError {
    WarrantifyError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> WarrantifyError {
    WarrantifyError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> WarrantifyError {
    WarrantifyError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> WarrantifyError {
    WarrantifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> WarrantifyError {
    WarrantifyError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_by_category() {
        assert_eq!(conflict("run in flight").status_code(), 409);
        assert_eq!(not_found("no such tenant").status_code(), 404);
        assert_eq!(validation_error("bad threshold").status_code(), 400);
        assert_eq!(external_service_error("fcm", "down").status_code(), 502);
    }

    #[test]
    fn context_prefixes_the_source_error() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing file",
        ));
        let err = result.context("reading service account key").unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("reading service account key"));
        assert!(rendered.contains("missing file"));
    }
}
