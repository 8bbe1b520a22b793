//! The recurring alert scheduler.
//!
//! An explicit service object owned by the process entry point: `start()`
//! arms the daily timer, `stop()` cancels it, and `trigger_once()` runs one
//! check on demand. Only one run may be in flight at a time; a trigger that
//! arrives while a run is active is rejected, never queued or interleaved.
//!
//! Within a run, tenants are processed sequentially. This bounds load on the
//! downstream email and push providers and keeps one tenant's slow channel
//! call from racing another tenant's settings update.

use crate::timer::next_run_delay;
use chrono::{Local, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use warrantify_common::models::{ExpiringWarranty, TenantSettings};
use warrantify_common::services::{AlertStore, BoxedError, EmailChannel, PushChannel};
use warrantify_expiry::{classify, WarrantyStatus};

/// Push alerts dispatched per tenant per run, by ascending days remaining.
/// Bounds per-run notification volume for tenants with many expiring items.
pub const PUSH_ALERTS_PER_RUN: usize = 3;

/// Errors surfaced by the scheduler itself.
///
/// Per-tenant and per-channel failures are logged and counted in the
/// [`RunSummary`] instead; only run-level conditions become errors.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// A run is already in flight; the trigger was rejected.
    #[error("an alert run is already in flight")]
    AlreadyRunning,

    /// The tenant list could not be loaded, aborting the run.
    #[error("failed to load the tenant list: {0}")]
    TenantListUnavailable(String),
}

/// Outcome of one alert run, returned to manual triggers and logged for
/// scheduled ones.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Tenants processed to completion.
    pub tenants_processed: usize,
    /// Tenants skipped after a processing error.
    pub tenants_failed: usize,
    /// Tenants whose last-notified timestamp was updated.
    pub tenants_notified: usize,
    /// Digest emails accepted by the provider.
    pub emails_sent: usize,
    /// Push multicasts with at least one delivery.
    pub pushes_sent: usize,
    /// Channel dispatches that failed outright.
    pub channel_failures: usize,
}

/// The recurring warranty expiry alert scheduler.
///
/// Constructed with an injected store and channels; tests build it directly
/// against in-memory fakes.
pub struct AlertScheduler<S: AlertStore> {
    store: Arc<S>,
    email: Option<Arc<dyn EmailChannel<Error = BoxedError>>>,
    push: Option<Arc<dyn PushChannel<Error = BoxedError>>>,
    daily_time: NaiveTime,
    run_lock: Mutex<()>,
    cancel: CancellationToken,
    started: AtomicBool,
}

impl<S: AlertStore + 'static> AlertScheduler<S> {
    /// Create a new scheduler.
    ///
    /// A channel passed as `None` is simply never dispatched to, regardless
    /// of per-tenant settings.
    pub fn new(
        store: Arc<S>,
        email: Option<Arc<dyn EmailChannel<Error = BoxedError>>>,
        push: Option<Arc<dyn PushChannel<Error = BoxedError>>>,
        daily_time: NaiveTime,
    ) -> Self {
        Self {
            store,
            email,
            push,
            daily_time,
            run_lock: Mutex::new(()),
            cancel: CancellationToken::new(),
            started: AtomicBool::new(false),
        }
    }

    /// Arm the daily timer.
    ///
    /// Returns the timer task handle, or `None` if the scheduler was already
    /// started. The timer fires at the configured wall-clock time and skips a
    /// tick whenever the previous run is still in flight.
    pub fn start(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("Alert scheduler already started");
            return None;
        }

        info!(
            "Starting notification scheduler (runs daily at {})",
            self.daily_time.format("%H:%M")
        );

        let scheduler = Arc::clone(self);
        Some(tokio::spawn(async move {
            loop {
                let delay = next_run_delay(scheduler.daily_time, Local::now());
                debug!("Next alert run in {}s", delay.as_secs());

                tokio::select! {
                    _ = scheduler.cancel.cancelled() => {
                        info!("Alert scheduler stopping");
                        break;
                    }
                    _ = tokio::time::sleep(delay) => {
                        match scheduler.trigger_once().await {
                            Ok(summary) => info!(
                                "Scheduled alert run finished: {} tenant(s) processed, {} notified",
                                summary.tenants_processed, summary.tenants_notified
                            ),
                            Err(SchedulerError::AlreadyRunning) => {
                                warn!("Skipping scheduled alert run: previous run still in flight")
                            }
                            Err(err) => error!("Scheduled alert run failed: {}", err),
                        }
                    }
                }
            }
        }))
    }

    /// Stop the daily timer. An in-flight run finishes on its own.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Run one alert check now, against today's calendar date.
    ///
    /// Rejected with [`SchedulerError::AlreadyRunning`] while another run
    /// (scheduled or manual) is in flight.
    pub async fn trigger_once(&self) -> Result<RunSummary, SchedulerError> {
        self.trigger_for_date(Local::now().date_naive()).await
    }

    /// Run one alert check for an explicit reference date.
    ///
    /// The scheduled timer and `trigger_once` both funnel through here; tests
    /// pass a fixed date to keep classification deterministic.
    pub async fn trigger_for_date(&self, today: NaiveDate) -> Result<RunSummary, SchedulerError> {
        let Ok(_guard) = self.run_lock.try_lock() else {
            return Err(SchedulerError::AlreadyRunning);
        };
        self.run(today).await
    }

    async fn run(&self, today: NaiveDate) -> Result<RunSummary, SchedulerError> {
        info!("Checking for expiring warranties");

        let tenants = self.store.list_notifiable_tenants().await.map_err(|e| {
            error!("Failed to load the tenant list: {}", e);
            SchedulerError::TenantListUnavailable(e.to_string())
        })?;

        info!(
            "Found {} tenant(s) with notifications enabled",
            tenants.len()
        );

        let mut summary = RunSummary::default();
        for tenant in &tenants {
            match self.process_tenant(tenant, today, &mut summary).await {
                Ok(()) => summary.tenants_processed += 1,
                Err(err) => {
                    error!("Error processing tenant {}: {}", tenant.tenant_id, err);
                    summary.tenants_failed += 1;
                }
            }
        }

        info!(
            "Notification check completed: {} processed, {} failed, {} notified",
            summary.tenants_processed, summary.tenants_failed, summary.tenants_notified
        );
        Ok(summary)
    }

    async fn process_tenant(
        &self,
        tenant: &TenantSettings,
        today: NaiveDate,
        summary: &mut RunSummary,
    ) -> Result<(), S::Error> {
        // The store pre-filters to notifiable tenants; a tenant that slips
        // through with every channel off must not cost a warranty read.
        if !tenant.any_channel_enabled() {
            return Ok(());
        }

        let warranties = self.store.warranties_for_tenant(&tenant.tenant_id).await?;
        let threshold = tenant.effective_threshold();

        let mut expiring: Vec<ExpiringWarranty> = warranties
            .iter()
            .filter_map(|warranty| {
                let computed = classify(warranty, threshold, today);
                match (computed.status, computed.days_remaining, computed.expiry_date) {
                    (WarrantyStatus::ExpiringSoon, Some(days), Some(expiry)) => {
                        Some(ExpiringWarranty {
                            id: warranty.id.clone(),
                            product_name: warranty.product_name.clone(),
                            retailer: warranty.retailer.clone(),
                            days_remaining: days,
                            expiry_date: expiry,
                        })
                    }
                    _ => None,
                }
            })
            .collect();

        if expiring.is_empty() {
            debug!("No expiring warranties for tenant {}", tenant.tenant_id);
            return Ok(());
        }

        // Stable sort: ties keep the store's order.
        expiring.sort_by_key(|item| item.days_remaining);

        info!(
            "Found {} expiring warranties for tenant {}",
            expiring.len(),
            tenant.tenant_id
        );

        self.dispatch_email(tenant, &expiring, threshold, summary)
            .await;
        self.dispatch_push(tenant, &expiring, summary).await;

        // Bookkeeping is best-effort: recorded after any attempted dispatch,
        // even when every channel failed. Delivery failures stay visible
        // through the summary counts and logs, never through a resend.
        match self.store.mark_notified(&tenant.tenant_id, Utc::now()).await {
            Ok(()) => summary.tenants_notified += 1,
            Err(err) => error!(
                "Failed to update last notification timestamp for tenant {}: {}",
                tenant.tenant_id, err
            ),
        }

        Ok(())
    }

    async fn dispatch_email(
        &self,
        tenant: &TenantSettings,
        expiring: &[ExpiringWarranty],
        threshold: u16,
        summary: &mut RunSummary,
    ) {
        if !tenant.email_enabled {
            return;
        }
        let Some(email) = &self.email else {
            return;
        };
        let Some(address) = tenant.contact_email.as_deref() else {
            debug!(
                "Tenant {} has email enabled but no contact address",
                tenant.tenant_id
            );
            return;
        };

        match email.send_expiry_digest(address, expiring, threshold).await {
            Ok(receipt) => {
                info!(
                    "Expiry digest sent to tenant {}: {}",
                    tenant.tenant_id, receipt.message_id
                );
                summary.emails_sent += 1;
            }
            Err(err) => {
                error!(
                    "Failed to send expiry digest for tenant {}: {}",
                    tenant.tenant_id, err
                );
                summary.channel_failures += 1;
            }
        }
    }

    async fn dispatch_push(
        &self,
        tenant: &TenantSettings,
        expiring: &[ExpiringWarranty],
        summary: &mut RunSummary,
    ) {
        if !tenant.push_enabled {
            return;
        }
        let Some(push) = &self.push else {
            return;
        };

        let tokens = match self
            .store
            .device_tokens_for_tenant(&tenant.tenant_id)
            .await
        {
            Ok(tokens) => tokens,
            Err(err) => {
                error!(
                    "Failed to load device tokens for tenant {}: {}",
                    tenant.tenant_id, err
                );
                summary.channel_failures += 1;
                return;
            }
        };

        if tokens.is_empty() {
            debug!("No device tokens found for tenant {}", tenant.tenant_id);
            return;
        }

        let token_values: Vec<String> = tokens.into_iter().map(|t| t.token).collect();

        for item in expiring.iter().take(PUSH_ALERTS_PER_RUN) {
            match push.send_expiry_alert(&token_values, item).await {
                Ok(receipt) => {
                    if !receipt.invalid_tokens.is_empty() {
                        warn!(
                            "Provider reported {} stale token(s) for tenant {}",
                            receipt.invalid_tokens.len(),
                            tenant.tenant_id
                        );
                    }
                    if receipt.all_failed() {
                        summary.channel_failures += 1;
                    } else {
                        summary.pushes_sent += 1;
                    }
                }
                Err(err) => {
                    error!(
                        "Push dispatch failed for tenant {}: {}",
                        tenant.tenant_id, err
                    );
                    summary.channel_failures += 1;
                }
            }
        }
    }
}
