//! Daily trigger time handling.
//!
//! The scheduler fires once per day at a configured wall-clock time. These
//! helpers are pure so the next-fire computation can be pinned by tests.

use chrono::{DateTime, Duration, Local, NaiveTime};
use tracing::warn;

/// Trigger time used when none is configured.
pub const DEFAULT_DAILY_TIME: &str = "09:00";

/// Parse a configured "HH:MM" trigger time, falling back to the default.
pub fn parse_daily_time(raw: Option<&str>) -> NaiveTime {
    if let Some(value) = raw {
        match NaiveTime::parse_from_str(value.trim(), "%H:%M") {
            Ok(time) => return time,
            Err(_) => warn!(
                "Invalid notification time {:?}, falling back to {}",
                value, DEFAULT_DAILY_TIME
            ),
        }
    }
    NaiveTime::parse_from_str(DEFAULT_DAILY_TIME, "%H:%M").expect("default time is valid")
}

/// Time until the next occurrence of `daily_time` after `now`.
///
/// A `now` exactly on the trigger time waits a full day; the tick for the
/// current instant is considered already fired.
pub fn next_run_delay(daily_time: NaiveTime, now: DateTime<Local>) -> std::time::Duration {
    let now_local = now.naive_local();
    let today_fire = now_local.date().and_time(daily_time);

    let next_fire = if now_local < today_fire {
        today_fire
    } else {
        today_fire + Duration::days(1)
    };

    (next_fire - now_local)
        .to_std()
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parses_configured_time() {
        assert_eq!(
            parse_daily_time(Some("17:45")),
            NaiveTime::from_hms_opt(17, 45, 0).unwrap()
        );
    }

    #[test]
    fn missing_or_invalid_time_falls_back_to_nine() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(parse_daily_time(None), nine);
        assert_eq!(parse_daily_time(Some("9am")), nine);
        assert_eq!(parse_daily_time(Some("25:00")), nine);
    }

    #[test]
    fn delay_counts_down_to_todays_trigger() {
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let delay = next_run_delay(time, local(2025, 6, 2, 8, 0, 0));
        assert_eq!(delay, std::time::Duration::from_secs(3600));
    }

    #[test]
    fn delay_rolls_over_to_tomorrow_after_the_trigger() {
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let delay = next_run_delay(time, local(2025, 6, 2, 10, 30, 0));
        assert_eq!(delay, std::time::Duration::from_secs(22 * 3600 + 1800));
    }

    #[test]
    fn exactly_on_the_trigger_waits_a_full_day() {
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let delay = next_run_delay(time, local(2025, 6, 2, 9, 0, 0));
        assert_eq!(delay, std::time::Duration::from_secs(24 * 3600));
    }
}
