//! Email notification channel for Warrantify
//!
//! This crate renders and delivers warranty expiry digests through an HTTP
//! transactional mail provider. One digest aggregates every expiring item for
//! a tenant; delivery is attempted exactly once per scheduler run and retry
//! policy is left to the provider.
//!
//! # Features
//!
//! - Digest rendering (HTML plus a plain-text alternative)
//! - Bearer-authenticated JSON send API client
//! - [`EmailDispatchService`], the `EmailChannel` implementation the
//!   scheduler consumes
//! - A test-email endpoint for verifying provider configuration

pub mod client;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod service;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;
// Re-export the channel implementation
pub use service::EmailDispatchService;
// Re-export the error type for callers matching on failures
pub use client::EmailError;
