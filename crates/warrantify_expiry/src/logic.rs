// --- File: crates/warrantify_expiry/src/logic.rs ---
//! Expiry resolution and status classification.
//!
//! This is the one place warranty status is computed. The batch scheduler and
//! any presentation layer both call [`classify`], so a warranty can never be
//! "expiring soon" on the server and "active" in a client.
//!
//! All arithmetic happens on [`chrono::NaiveDate`]: plain calendar dates with
//! no timezone component. A "YYYY-MM-DD" input therefore cannot shift by a
//! day through timezone conversion, which is a documented correctness
//! requirement for this module.

use crate::period::{parse_warranty_period, PeriodOffset, PeriodParseError};
use chrono::{DateTime, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use warrantify_common::models::WarrantyItem;

/// Classification of one warranty relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarrantyStatus {
    /// More than `threshold` days of coverage left.
    Active,
    /// Within the alert threshold, boundary inclusive.
    ExpiringSoon,
    /// Coverage ended before the reference date.
    Expired,
    /// No expiry date could be resolved.
    Unknown,
}

/// The derived expiry state of one warranty. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryComputation {
    /// The authoritative expiry date, when one could be resolved.
    pub expiry_date: Option<NaiveDate>,
    /// Whole days between the reference date and expiry; negative once expired.
    pub days_remaining: Option<i64>,
    /// Status bucket under the caller's alert threshold.
    pub status: WarrantyStatus,
    /// Human-readable summary for presentation layers.
    pub status_text: String,
}

/// Parse a calendar date as entered by a user or stored upstream.
///
/// Accepts "YYYY-MM-DD" or a full RFC 3339 timestamp, whose date part is
/// taken as-is (no conversion to a local or UTC day).
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Advance a date by a parsed warranty period.
///
/// Days are added as days; months and years via calendar addition, where the
/// day-of-month is preserved and clamped to the last valid day of the target
/// month (2024-01-31 + 1 month = 2024-02-29).
pub fn apply_period(start: NaiveDate, offset: PeriodOffset) -> Option<NaiveDate> {
    match offset {
        PeriodOffset::Days(days) => start.checked_add_days(Days::new(u64::from(days))),
        PeriodOffset::Months(months) => start.checked_add_months(Months::new(months)),
        PeriodOffset::Years(years) => {
            start.checked_add_months(Months::new(years.saturating_mul(12)))
        }
    }
}

/// Resolve the authoritative expiry date for a warranty.
///
/// An explicit, parseable expiry date wins outright; the period string is not
/// consulted. Otherwise the purchase date must parse and the period must
/// yield an offset, or there is no resolved date.
pub fn resolve_expiry_date(item: &WarrantyItem) -> Option<NaiveDate> {
    if let Some(raw) = item.expiry_date.as_deref() {
        if let Some(date) = parse_calendar_date(raw) {
            return Some(date);
        }
    }

    let purchase = parse_calendar_date(item.purchase_date.as_deref()?)?;
    let offset = parse_warranty_period(item.warranty_period.as_deref()?).ok()?;
    apply_period(purchase, offset)
}

/// Classify one warranty against a reference date and alert threshold.
///
/// Pure and deterministic: identical `(item, threshold_days, today)` inputs
/// always produce an identical computation. The invariants are
///
/// * status is `Unknown` iff no expiry date resolves,
/// * `Expired` iff `days_remaining < 0`,
/// * `ExpiringSoon` iff `0 <= days_remaining <= threshold_days`,
/// * `Active` otherwise.
pub fn classify(item: &WarrantyItem, threshold_days: u16, today: NaiveDate) -> ExpiryComputation {
    let Some(expiry) = resolve_expiry_date(item) else {
        return ExpiryComputation {
            expiry_date: None,
            days_remaining: None,
            status: WarrantyStatus::Unknown,
            status_text: unresolved_text(item).to_string(),
        };
    };

    let days_remaining = expiry.signed_duration_since(today).num_days();

    let (status, status_text) = if days_remaining < 0 {
        (
            WarrantyStatus::Expired,
            format!("Expired on {}", format_display_date(expiry)),
        )
    } else if days_remaining <= i64::from(threshold_days) {
        (
            WarrantyStatus::ExpiringSoon,
            format!(
                "Expires in {} day{}",
                days_remaining,
                if days_remaining == 1 { "" } else { "s" }
            ),
        )
    } else {
        (
            WarrantyStatus::Active,
            format!("Expires on {}", format_display_date(expiry)),
        )
    };

    ExpiryComputation {
        expiry_date: Some(expiry),
        days_remaining: Some(days_remaining),
        status,
        status_text,
    }
}

/// Classify against the host's current local calendar date.
///
/// Convenience for presentation call sites; the scheduler passes `today`
/// explicitly so runs stay deterministic under test.
pub fn classify_today(item: &WarrantyItem, threshold_days: u16) -> ExpiryComputation {
    classify(item, threshold_days, Local::now().date_naive())
}

/// Format a date the way notifications and status text display it.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

// Why the warranty is unresolvable, mirrored in the status text so data-entry
// problems are distinguishable from genuinely absent information.
fn unresolved_text(item: &WarrantyItem) -> &'static str {
    let purchase = item.purchase_date.as_deref().map(str::trim).unwrap_or("");
    let period = item.warranty_period.as_deref().unwrap_or("");
    let period_missing = matches!(
        parse_warranty_period(period),
        Err(PeriodParseError::Unspecified) | Err(PeriodParseError::Empty)
    );

    if purchase.is_empty() || period_missing {
        "Unknown warranty"
    } else if parse_calendar_date(purchase).is_none() {
        "Invalid purchase date"
    } else {
        "Invalid warranty period"
    }
}
