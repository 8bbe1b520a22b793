//! Recurring warranty expiry alert scheduler for Warrantify
//!
//! This crate owns the batch job at the heart of the product: once a day (or
//! on demand) it walks every tenant with notifications enabled, classifies
//! their warranties, and fans alerts out across the email and push channels
//! with per-tenant and per-channel failure isolation.
//!
//! The scheduler is an explicit service object with `start()`, `stop()` and
//! `trigger_once()`; its lifecycle belongs to the process entry point, and
//! tests construct it directly with injected store and channel fakes.

pub mod service;
pub mod timer;

pub use service::{AlertScheduler, RunSummary, SchedulerError, PUSH_ALERTS_PER_RUN};
pub use timer::{next_run_delay, parse_daily_time, DEFAULT_DAILY_TIME};
