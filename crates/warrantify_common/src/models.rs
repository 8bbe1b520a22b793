// --- File: crates/warrantify_common/src/models.rs ---

// Canonical records shared by the store, the classifier, the channels and the
// scheduler. Field naming is snake_case everywhere; any translation from
// store-level column names happens in the persistence adapter, never here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A warranty as read from the store.
///
/// Created and mutated by the CRUD API, which lives outside this core; the
/// alert engine only ever reads these rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarrantyItem {
    /// Opaque unique identifier.
    pub id: String,

    /// Owning tenant.
    pub owner_id: String,

    /// Product name, non-empty.
    pub product_name: String,

    /// Retailer the product was bought from, when known.
    pub retailer: Option<String>,

    /// Purchase date as entered ("YYYY-MM-DD" or an RFC 3339 timestamp).
    pub purchase_date: Option<String>,

    /// Free-text warranty duration, e.g. "2 years" or "90 days".
    pub warranty_period: Option<String>,

    /// Explicit expiry date; authoritative over the period when present.
    pub expiry_date: Option<String>,
}

/// Per-tenant notification settings row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantSettings {
    /// The tenant these settings belong to.
    pub tenant_id: String,

    /// Address expiry digests are sent to, when the tenant has one.
    pub contact_email: Option<String>,

    /// Whether the email channel is enabled for this tenant.
    pub email_enabled: bool,

    /// Whether the push channel is enabled for this tenant.
    pub push_enabled: bool,

    /// Days before expiry at which an item counts as expiring soon (1-365).
    pub alert_threshold_days: Option<u16>,

    /// When an alert batch was last attempted for this tenant.
    pub last_notification_sent: Option<DateTime<Utc>>,
}

impl TenantSettings {
    /// Threshold applied when settings carry no usable value.
    pub const DEFAULT_ALERT_THRESHOLD_DAYS: u16 = 30;

    /// The alert threshold to classify with.
    ///
    /// Missing or out-of-range values (outside 1-365) fall back to the
    /// default so classification never sees an invalid threshold.
    pub fn effective_threshold(&self) -> u16 {
        match self.alert_threshold_days {
            Some(days) if (1..=365).contains(&days) => days,
            _ => Self::DEFAULT_ALERT_THRESHOLD_DAYS,
        }
    }

    /// True when at least one notification channel is enabled.
    pub fn any_channel_enabled(&self) -> bool {
        self.email_enabled || self.push_enabled
    }
}

/// A push-capable endpoint registered by a client device.
///
/// Rows are upserted by device registration calls; the alert engine reads
/// them and never deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceToken {
    /// The tenant the device belongs to.
    pub tenant_id: String,

    /// The push provider registration token; unique across tenants.
    pub token: String,

    /// Client platform, e.g. "android" or "ios".
    pub platform: String,

    /// When the token was last refreshed by a registration call.
    pub last_used: Option<DateTime<Utc>>,
}

impl DeviceToken {
    /// Create a new device token record stamped with the current time.
    pub fn new(tenant_id: String, token: String, platform: String) -> Self {
        Self {
            tenant_id,
            token,
            platform,
            last_used: Some(Utc::now()),
        }
    }
}

/// One expiring warranty as handed to the notification channels.
///
/// A derived view: the scheduler builds these from `WarrantyItem` plus the
/// classifier output, so channels never re-run date logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiringWarranty {
    /// Id of the underlying warranty.
    pub id: String,

    /// Product name shown in the notification.
    pub product_name: String,

    /// Retailer shown in the digest table, when known.
    pub retailer: Option<String>,

    /// Whole days until expiry; 0 means "expires today".
    pub days_remaining: i64,

    /// The resolved expiry date.
    pub expiry_date: NaiveDate,
}
