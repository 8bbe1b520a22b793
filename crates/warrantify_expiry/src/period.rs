// --- File: crates/warrantify_expiry/src/period.rs ---
//! Parsing of human-entered warranty durations.
//!
//! Users (and the receipt scanner upstream) enter durations as free text:
//! "1 year", "90 days", "6 Months", sometimes just "2". The parser turns
//! these into a typed calendar offset, or a typed failure the resolver maps
//! to the unknown-warranty state.

use thiserror::Error;

/// Why a warranty period string failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    /// The field holds a recognized "no value" sentinel.
    #[error("warranty period is not specified")]
    Unspecified,

    /// The string is empty after trimming.
    #[error("warranty period is empty")]
    Empty,

    /// The leading token is not a whole number.
    #[error("invalid period value: {0}")]
    InvalidValue(String),

    /// The unit token is not a recognized calendar unit.
    #[error("unrecognized period unit: {0}")]
    UnknownUnit(String),
}

/// A parsed warranty duration as a calendar offset.
///
/// Weeks are folded into days at parse time; months and years stay calendar
/// units because their length depends on the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodOffset {
    Days(u32),
    Months(u32),
    Years(u32),
}

/// Parse a free-text warranty duration into a [`PeriodOffset`].
///
/// The input is trimmed, lowercased and split at the first whitespace into a
/// numeric value and a unit token. The unit is matched by prefix ("day",
/// "week", "month", "year"); a missing unit means years. The sentinels
/// "not specified" and "not found" parse to [`PeriodParseError::Unspecified`]
/// so callers can treat them as a data-quality state rather than an error.
pub fn parse_warranty_period(raw: &str) -> Result<PeriodOffset, PeriodParseError> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(PeriodParseError::Empty);
    }
    if normalized == "not specified" || normalized == "not found" {
        return Err(PeriodParseError::Unspecified);
    }

    let mut parts = normalized.splitn(2, char::is_whitespace);
    let value_token = parts.next().unwrap_or_default();
    let unit_token = parts.next().map(str::trim).unwrap_or("");

    let value: u32 = value_token
        .parse()
        .map_err(|_| PeriodParseError::InvalidValue(value_token.to_string()))?;

    // A bare number is taken as a year count.
    let unit = if unit_token.is_empty() {
        "year"
    } else {
        unit_token
    };

    if unit.starts_with("day") {
        Ok(PeriodOffset::Days(value))
    } else if unit.starts_with("week") {
        Ok(PeriodOffset::Days(value.saturating_mul(7)))
    } else if unit.starts_with("month") {
        Ok(PeriodOffset::Months(value))
    } else if unit.starts_with("year") {
        Ok(PeriodOffset::Years(value))
    } else {
        Err(PeriodParseError::UnknownUnit(unit.to_string()))
    }
}
