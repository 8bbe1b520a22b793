// --- File: crates/warrantify_common/src/services.rs ---
//! Service abstractions for the alert engine's collaborators.
//!
//! This module provides trait definitions for the external services the alert
//! run depends on: the persistence collaborator and the two notification
//! channels. These traits allow for dependency injection and easier testing by
//! decoupling the scheduler from concrete store and provider implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::{DeviceToken, ExpiringWarranty, TenantSettings, WarrantyItem};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Read/write surface the alert run needs from the persistence collaborator.
///
/// The scheduler depends only on this trait, never on a concrete database
/// client, so tests can substitute an in-memory fake.
pub trait AlertStore: Send + Sync {
    /// Error type returned by store operations.
    type Error: StdError + Send + Sync + 'static;

    /// Tenants with at least one notification channel enabled.
    ///
    /// Tenants with every channel disabled must not appear here; the run
    /// performs no work at all for them.
    fn list_notifiable_tenants(&self) -> BoxFuture<'_, Vec<TenantSettings>, Self::Error>;

    /// All warranties owned by one tenant.
    fn warranties_for_tenant(
        &self,
        tenant_id: &str,
    ) -> BoxFuture<'_, Vec<WarrantyItem>, Self::Error>;

    /// Registered push endpoints for one tenant, most recently used first.
    fn device_tokens_for_tenant(
        &self,
        tenant_id: &str,
    ) -> BoxFuture<'_, Vec<DeviceToken>, Self::Error>;

    /// Record that a notification batch was attempted for the tenant.
    ///
    /// Idempotent, last-write-wins.
    fn mark_notified(
        &self,
        tenant_id: &str,
        at: DateTime<Utc>,
    ) -> BoxFuture<'_, (), Self::Error>;
}

/// A trait for the email notification channel.
///
/// One digest per tenant per run; delivery is attempted exactly once and any
/// retry policy belongs to the transport behind the implementation.
pub trait EmailChannel: Send + Sync {
    /// Error type returned by email operations.
    type Error: StdError + Send + Sync + 'static;

    /// Send one aggregated digest covering every expiring item for a tenant.
    fn send_expiry_digest(
        &self,
        to: &str,
        items: &[ExpiringWarranty],
        threshold_days: u16,
    ) -> BoxFuture<'_, EmailReceipt, Self::Error>;

    /// Send a short test message to verify provider configuration.
    fn send_test_message(&self, to: &str) -> BoxFuture<'_, EmailReceipt, Self::Error>;
}

/// A trait for the push notification channel.
pub trait PushChannel: Send + Sync {
    /// Error type returned by push operations.
    type Error: StdError + Send + Sync + 'static;

    /// Multicast one expiring-warranty alert to every token.
    ///
    /// Returns per-token counts rather than failing on the first bad token;
    /// tokens the provider reports as unregistered are surfaced in the
    /// receipt for the caller to act on.
    fn send_expiry_alert(
        &self,
        tokens: &[String],
        item: &ExpiringWarranty,
    ) -> BoxFuture<'_, PushReceipt, Self::Error>;
}

/// A factory for creating service instances.
///
/// This trait provides access to the channel and store instances the
/// application needs, conditionally constructed from configuration.
pub trait ServiceFactory: Send + Sync {
    /// Get the email channel, when configured.
    fn email_channel(&self) -> Option<Arc<dyn EmailChannel<Error = BoxedError>>>;

    /// Get the push channel, when configured.
    fn push_channel(&self) -> Option<Arc<dyn PushChannel<Error = BoxedError>>>;
}

/// Represents the result of a delivered email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReceipt {
    /// Provider-assigned id of the message.
    pub message_id: String,
    /// Provider-reported status.
    pub status: String,
}

/// Represents the outcome of one push multicast.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushReceipt {
    /// Tokens the provider accepted the message for.
    pub delivered: usize,
    /// Tokens the provider rejected.
    pub failed: usize,
    /// Tokens reported invalid or unregistered; surfaced for cleanup by the
    /// token lifecycle owner, never deleted here.
    pub invalid_tokens: Vec<String>,
}

impl PushReceipt {
    /// True when nothing was delivered despite at least one attempt.
    pub fn all_failed(&self) -> bool {
        self.delivered == 0 && self.failed > 0
    }
}
