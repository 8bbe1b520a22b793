#[cfg(test)]
mod tests {
    use crate::logic::{classify, resolve_expiry_date, WarrantyStatus};
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;
    use warrantify_common::models::WarrantyItem;

    // Helper to build an item around a generated purchase date and period.
    fn item_with(purchase: NaiveDate, period: String) -> WarrantyItem {
        WarrantyItem {
            id: "w-prop".to_string(),
            owner_id: "tenant-prop".to_string(),
            product_name: "Generated product".to_string(),
            retailer: None,
            purchase_date: Some(purchase.format("%Y-%m-%d").to_string()),
            warranty_period: Some(period),
            expiry_date: None,
        }
    }

    // Generate a date within a broad but representable range.
    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (2000i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d).expect("day <= 28 is valid in every month")
        })
    }

    proptest! {
        // Resolution is pure: the same inputs always produce the same date.
        #[test]
        fn resolver_is_deterministic(
            purchase in arb_date(),
            value in 1u32..60,
            unit in prop::sample::select(vec!["days", "weeks", "months", "years"]),
        ) {
            let item = item_with(purchase, format!("{} {}", value, unit));
            let first = resolve_expiry_date(&item);
            let second = resolve_expiry_date(&item);
            prop_assert_eq!(first, second);
            prop_assert!(first.is_some());
        }

        // Classification is idempotent for identical (item, threshold, today).
        #[test]
        fn classification_is_idempotent(
            purchase in arb_date(),
            value in 1u32..60,
            today_offset in 0u64..4000,
            threshold in 1u16..=365,
        ) {
            let item = item_with(purchase, format!("{} months", value));
            let today = purchase.checked_add_days(Days::new(today_offset)).unwrap();
            let first = classify(&item, threshold, today);
            let second = classify(&item, threshold, today);
            prop_assert_eq!(first, second);
        }

        // The status buckets partition the days_remaining axis exactly.
        #[test]
        fn status_matches_days_remaining(
            purchase in arb_date(),
            value in 1u32..120,
            today_offset in 0u64..6000,
            threshold in 1u16..=365,
        ) {
            let item = item_with(purchase, format!("{} weeks", value));
            let today = purchase.checked_add_days(Days::new(today_offset)).unwrap();
            let computed = classify(&item, threshold, today);

            let days = computed.days_remaining.expect("period always resolves");
            let expected = if days < 0 {
                WarrantyStatus::Expired
            } else if days <= i64::from(threshold) {
                WarrantyStatus::ExpiringSoon
            } else {
                WarrantyStatus::Active
            };
            prop_assert_eq!(computed.status, expected);
        }

        // Day-based periods are exact day arithmetic.
        #[test]
        fn day_periods_add_exactly(
            purchase in arb_date(),
            days in 1u32..2000,
        ) {
            let item = item_with(purchase, format!("{} days", days));
            let resolved = resolve_expiry_date(&item).expect("day period always resolves");
            let diff = resolved.signed_duration_since(purchase).num_days();
            prop_assert_eq!(diff, i64::from(days));
        }
    }
}
