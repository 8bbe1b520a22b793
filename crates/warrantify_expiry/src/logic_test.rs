#[cfg(test)]
mod tests {
    use crate::logic::{classify, resolve_expiry_date, ExpiryComputation, WarrantyStatus};
    use chrono::NaiveDate;
    use warrantify_common::models::WarrantyItem;

    fn item(
        purchase_date: Option<&str>,
        warranty_period: Option<&str>,
        expiry_date: Option<&str>,
    ) -> WarrantyItem {
        WarrantyItem {
            id: "w-1".to_string(),
            owner_id: "tenant-1".to_string(),
            product_name: "Dishwasher".to_string(),
            retailer: Some("ACME Appliances".to_string()),
            purchase_date: purchase_date.map(str::to_string),
            warranty_period: warranty_period.map(str::to_string),
            expiry_date: expiry_date.map(str::to_string),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_year_from_purchase_resolves_to_same_day_next_year() {
        let resolved = resolve_expiry_date(&item(Some("2024-01-01"), Some("1 year"), None));
        assert_eq!(resolved, Some(date(2025, 1, 1)));
    }

    #[test]
    fn ninety_days_from_mid_june() {
        let resolved = resolve_expiry_date(&item(Some("2024-06-15"), Some("90 days"), None));
        assert_eq!(resolved, Some(date(2024, 9, 13)));
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        // Expiry 2025-01-01, today 2024-12-02: exactly 30 days out.
        let computed = classify(
            &item(Some("2024-01-01"), Some("1 year"), None),
            30,
            date(2024, 12, 2),
        );
        assert_eq!(computed.days_remaining, Some(30));
        assert_eq!(computed.status, WarrantyStatus::ExpiringSoon);
    }

    #[test]
    fn one_day_outside_threshold_is_active() {
        let computed = classify(
            &item(Some("2024-01-01"), Some("1 year"), None),
            30,
            date(2024, 12, 1),
        );
        assert_eq!(computed.days_remaining, Some(31));
        assert_eq!(computed.status, WarrantyStatus::Active);
    }

    #[test]
    fn day_after_expiry_is_expired() {
        let computed = classify(
            &item(Some("2024-01-01"), Some("1 year"), None),
            30,
            date(2025, 1, 2),
        );
        assert_eq!(computed.days_remaining, Some(-1));
        assert_eq!(computed.status, WarrantyStatus::Expired);
    }

    #[test]
    fn expiry_day_itself_counts_as_expiring_soon() {
        let computed = classify(
            &item(Some("2024-01-01"), Some("1 year"), None),
            30,
            date(2025, 1, 1),
        );
        assert_eq!(computed.days_remaining, Some(0));
        assert_eq!(computed.status, WarrantyStatus::ExpiringSoon);
    }

    #[test]
    fn unspecified_period_is_unknown_regardless_of_purchase_date() {
        let computed = classify(
            &item(Some("2024-01-01"), Some("Not specified"), None),
            30,
            date(2024, 6, 1),
        );
        assert_eq!(
            computed,
            ExpiryComputation {
                expiry_date: None,
                days_remaining: None,
                status: WarrantyStatus::Unknown,
                status_text: "Unknown warranty".to_string(),
            }
        );
    }

    #[test]
    fn explicit_expiry_date_wins_over_period() {
        // The period would put expiry in 2026; the explicit date is authoritative.
        let computed = classify(
            &item(Some("2024-01-01"), Some("2 years"), Some("2024-07-01")),
            30,
            date(2024, 6, 20),
        );
        assert_eq!(computed.expiry_date, Some(date(2024, 7, 1)));
        assert_eq!(computed.days_remaining, Some(11));
        assert_eq!(computed.status, WarrantyStatus::ExpiringSoon);
    }

    #[test]
    fn unparseable_explicit_expiry_falls_back_to_period() {
        let resolved = resolve_expiry_date(&item(
            Some("2024-01-01"),
            Some("1 year"),
            Some("sometime next year"),
        ));
        assert_eq!(resolved, Some(date(2025, 1, 1)));
    }

    #[test]
    fn invalid_purchase_date_is_unknown_with_reason() {
        let computed = classify(
            &item(Some("01/13/2024"), Some("1 year"), None),
            30,
            date(2024, 6, 1),
        );
        assert_eq!(computed.status, WarrantyStatus::Unknown);
        assert_eq!(computed.status_text, "Invalid purchase date");
    }

    #[test]
    fn garbage_period_is_unknown_with_reason() {
        let computed = classify(
            &item(Some("2024-01-01"), Some("lifetime coverage"), None),
            30,
            date(2024, 6, 1),
        );
        assert_eq!(computed.status, WarrantyStatus::Unknown);
        assert_eq!(computed.status_text, "Invalid warranty period");
    }

    #[test]
    fn month_addition_clamps_to_end_of_february() {
        assert_eq!(
            resolve_expiry_date(&item(Some("2024-01-31"), Some("1 month"), None)),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            resolve_expiry_date(&item(Some("2023-01-31"), Some("1 month"), None)),
            Some(date(2023, 2, 28))
        );
    }

    #[test]
    fn leap_day_purchase_plus_one_year_clamps() {
        assert_eq!(
            resolve_expiry_date(&item(Some("2024-02-29"), Some("1 year"), None)),
            Some(date(2025, 2, 28))
        );
    }

    #[test]
    fn weeks_are_seven_days_each() {
        assert_eq!(
            resolve_expiry_date(&item(Some("2024-06-01"), Some("2 weeks"), None)),
            Some(date(2024, 6, 15))
        );
    }

    #[test]
    fn bare_number_means_years() {
        assert_eq!(
            resolve_expiry_date(&item(Some("2024-03-10"), Some("3"), None)),
            Some(date(2027, 3, 10))
        );
    }

    #[test]
    fn rfc3339_timestamp_keeps_its_calendar_day() {
        // The date part is taken verbatim; the offset must not shift the day.
        let resolved = resolve_expiry_date(&item(
            Some("2024-01-01T23:30:00+11:00"),
            Some("1 year"),
            None,
        ));
        assert_eq!(resolved, Some(date(2025, 1, 1)));
    }

    #[test]
    fn classify_today_agrees_with_the_explicit_date_form() {
        // Server-side scheduling and presentation both go through classify;
        // the convenience wrapper must not drift from it.
        let item = item(Some("2024-01-01"), Some("1 year"), None);
        let today = chrono::Local::now().date_naive();
        assert_eq!(
            crate::logic::classify_today(&item, 30),
            classify(&item, 30, today)
        );
    }

    #[test]
    fn singular_day_status_text() {
        let computed = classify(
            &item(Some("2024-01-01"), Some("1 year"), None),
            30,
            date(2024, 12, 31),
        );
        assert_eq!(computed.status_text, "Expires in 1 day");
    }
}
