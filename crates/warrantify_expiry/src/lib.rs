// --- File: crates/warrantify_expiry/src/lib.rs ---
// Declare modules within this crate
pub mod logic;
#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod logic_test;
pub mod period;

pub use logic::{
    apply_period, classify, classify_today, format_display_date, parse_calendar_date,
    resolve_expiry_date, ExpiryComputation, WarrantyStatus,
};
pub use period::{parse_warranty_period, PeriodOffset, PeriodParseError};
