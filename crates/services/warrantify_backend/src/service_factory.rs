// --- File: crates/services/warrantify_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! This module provides the `ServiceFactory` implementation for the backend
//! service. Channels are initialized from configuration and handed out as
//! trait objects with a unified error type, so the scheduler never depends on
//! a concrete provider implementation.

use std::sync::Arc;
use tracing::info;
use warrantify_common::models::ExpiringWarranty;
use warrantify_common::services::{
    BoxFuture, BoxedError, EmailChannel, EmailReceipt, PushChannel, PushReceipt, ServiceFactory,
};
use warrantify_common::{is_email_enabled, is_push_enabled};
use warrantify_config::AppConfig;
use warrantify_email::EmailDispatchService;
use warrantify_push::PushDispatchService;

/// Wrapper converting the email channel's error type to [`BoxedError`].
struct BoxedEmailChannel {
    inner: EmailDispatchService,
}

impl EmailChannel for BoxedEmailChannel {
    type Error = BoxedError;

    fn send_expiry_digest(
        &self,
        to: &str,
        items: &[ExpiringWarranty],
        threshold_days: u16,
    ) -> BoxFuture<'_, EmailReceipt, Self::Error> {
        let to = to.to_string();
        let items = items.to_vec();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .send_expiry_digest(&to, &items, threshold_days)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn send_test_message(&self, to: &str) -> BoxFuture<'_, EmailReceipt, Self::Error> {
        let to = to.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .send_test_message(&to)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Wrapper converting the push channel's error type to [`BoxedError`].
struct BoxedPushChannel {
    inner: PushDispatchService,
}

impl PushChannel for BoxedPushChannel {
    type Error = BoxedError;

    fn send_expiry_alert(
        &self,
        tokens: &[String],
        item: &ExpiringWarranty,
    ) -> BoxFuture<'_, PushReceipt, Self::Error> {
        let tokens = tokens.to_vec();
        let item = item.clone();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .send_expiry_alert(&tokens, &item)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Service factory for the backend.
///
/// Initializes the notification channels based on the runtime configuration
/// flags and the presence of their config sections. A channel that is
/// disabled or unconfigured is simply absent, and the scheduler skips it.
pub struct WarrantifyServiceFactory {
    email_channel: Option<Arc<dyn EmailChannel<Error = BoxedError>>>,
    push_channel: Option<Arc<dyn PushChannel<Error = BoxedError>>>,
}

impl WarrantifyServiceFactory {
    /// Create a new service factory from the application configuration.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let mut factory = Self {
            email_channel: None,
            push_channel: None,
        };

        if is_email_enabled(&config) {
            info!("Initializing email channel...");
            let service = EmailDispatchService::new(config.email.clone().unwrap());
            factory.email_channel = Some(Arc::new(BoxedEmailChannel { inner: service }));
            info!("Email channel initialized.");
        } else {
            info!("Email channel disabled via runtime config or missing email config section.");
        }

        if is_push_enabled(&config) {
            info!("Initializing push channel...");
            let service = PushDispatchService::new(config.firebase.clone().unwrap());
            factory.push_channel = Some(Arc::new(BoxedPushChannel { inner: service }));
            info!("Push channel initialized.");
        } else {
            info!("Push channel disabled via runtime config or missing firebase config section.");
        }

        factory
    }
}

impl ServiceFactory for WarrantifyServiceFactory {
    fn email_channel(&self) -> Option<Arc<dyn EmailChannel<Error = BoxedError>>> {
        self.email_channel.clone()
    }

    fn push_channel(&self) -> Option<Arc<dyn PushChannel<Error = BoxedError>>> {
        self.push_channel.clone()
    }
}
