//! Firebase Cloud Messaging push channel for Warrantify
//!
//! This crate delivers expiring-warranty alerts to registered devices via the
//! FCM HTTP v1 API and maintains the per-tenant device token registry.
//!
//! # Features
//!
//! - Authentication with Firebase using service account credentials
//! - Sequential multicast with per-token delivered/failed accounting
//! - Stale tokens surfaced to callers, never deleted here
//! - Idempotent device registration endpoint for client apps

pub mod auth;
pub mod client;
pub mod handlers;
pub mod registry;
pub mod routes;
pub mod service;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;
// Re-export the channel implementation and registry
pub use registry::DeviceTokenRegistry;
pub use service::PushDispatchService;
// Re-export the error type for callers matching on failures
pub use client::PushError;
