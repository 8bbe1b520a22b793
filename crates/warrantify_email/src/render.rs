//! Rendering of outbound email bodies.
//!
//! One digest aggregates every expiring warranty for a tenant into a single
//! message: an HTML table plus a plain-text alternative for clients that
//! strip markup.

use warrantify_common::models::ExpiringWarranty;
use warrantify_expiry::format_display_date;

/// A fully rendered message, ready for the provider.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

fn warranty_word(count: usize) -> &'static str {
    if count == 1 {
        "warranty"
    } else {
        "warranties"
    }
}

/// Render the aggregated expiry digest for one tenant.
pub fn render_expiry_digest(items: &[ExpiringWarranty], threshold_days: u16) -> RenderedEmail {
    let count = items.len();
    let subject = format!("{} {} expiring soon", count, warranty_word(count));

    let table_rows: String = items
        .iter()
        .map(|item| {
            format!(
                "<tr>\
                 <td style=\"padding:12px;border-bottom:1px solid #e5e7eb;\"><strong>{}</strong></td>\
                 <td style=\"padding:12px;border-bottom:1px solid #e5e7eb;\">{}</td>\
                 <td style=\"padding:12px;border-bottom:1px solid #e5e7eb;color:#f59e0b;\"><strong>{} days</strong></td>\
                 <td style=\"padding:12px;border-bottom:1px solid #e5e7eb;\">{}</td>\
                 </tr>",
                item.product_name,
                item.retailer.as_deref().unwrap_or("N/A"),
                item.days_remaining,
                format_display_date(item.expiry_date),
            )
        })
        .collect();

    let html = format!(
        "<!DOCTYPE html>\
<html>\
<body style=\"margin:0;padding:0;font-family:Arial,sans-serif;background-color:#f3f4f6;\">\
<div style=\"max-width:600px;margin:20px auto;background-color:#ffffff;border-radius:8px;overflow:hidden;\">\
<div style=\"background-color:#d97706;padding:30px;text-align:center;\">\
<h1 style=\"color:#ffffff;margin:0;font-size:28px;\">Warranty alert</h1>\
<p style=\"color:rgba(255,255,255,0.9);margin:10px 0 0 0;\">You have {count} {word} expiring soon</p>\
</div>\
<div style=\"padding:30px;\">\
<p style=\"color:#374151;font-size:16px;\">The following {word_are} expiring within the next <strong>{threshold} days</strong>:</p>\
<table style=\"width:100%;border-collapse:collapse;margin:20px 0;border:1px solid #e5e7eb;\">\
<thead><tr style=\"background-color:#f9fafb;\">\
<th style=\"padding:12px;text-align:left;color:#6b7280;\">Product</th>\
<th style=\"padding:12px;text-align:left;color:#6b7280;\">Retailer</th>\
<th style=\"padding:12px;text-align:left;color:#6b7280;\">Days left</th>\
<th style=\"padding:12px;text-align:left;color:#6b7280;\">Expires on</th>\
</tr></thead>\
<tbody>{rows}</tbody>\
</table>\
<p style=\"color:#374151;font-size:14px;\">Review your warranties before they expire in case a claim or renewal is due.</p>\
</div>\
<div style=\"background-color:#f9fafb;padding:20px;text-align:center;border-top:1px solid #e5e7eb;\">\
<p style=\"color:#6b7280;font-size:12px;margin:0;\">You're receiving this email because you enabled warranty alerts in Warrantify.</p>\
</div>\
</div>\
</body>\
</html>",
        count = count,
        word = warranty_word(count),
        word_are = if count == 1 {
            "warranty is"
        } else {
            "warranties are"
        },
        threshold = threshold_days,
        rows = table_rows,
    );

    let text_lines: String = items
        .iter()
        .map(|item| {
            format!(
                "- {} ({}) - expires in {} days ({})\n",
                item.product_name,
                item.retailer.as_deref().unwrap_or("N/A"),
                item.days_remaining,
                format_display_date(item.expiry_date),
            )
        })
        .collect();

    let text = format!(
        "Warranty expiry alert\n\nYou have {} {} expiring within the next {} days:\n\n{}",
        count,
        warranty_word(count),
        threshold_days,
        text_lines,
    );

    RenderedEmail {
        subject,
        html,
        text,
    }
}

/// Render the short message used to verify provider configuration.
pub fn render_test_message() -> RenderedEmail {
    RenderedEmail {
        subject: "Test email - Warrantify notifications".to_string(),
        html: "<!DOCTYPE html>\
<html>\
<body style=\"font-family:Arial,sans-serif;color:#333;max-width:600px;margin:0 auto;padding:20px;\">\
<h1 style=\"color:#d97706;\">Email configured successfully</h1>\
<p>Your email notifications are working. You'll receive an alert when a warranty is about to expire.</p>\
</body>\
</html>"
            .to_string(),
        text: "Email configured successfully. You will now receive warranty expiry notifications."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_item(name: &str, days: i64) -> ExpiringWarranty {
        ExpiringWarranty {
            id: format!("w-{}", name),
            product_name: name.to_string(),
            retailer: Some("ACME".to_string()),
            days_remaining: days,
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn subject_counts_items_and_pluralizes() {
        let one = render_expiry_digest(&[sample_item("Kettle", 5)], 30);
        assert_eq!(one.subject, "1 warranty expiring soon");

        let two = render_expiry_digest(&[sample_item("Kettle", 5), sample_item("Toaster", 9)], 30);
        assert_eq!(two.subject, "2 warranties expiring soon");
    }

    #[test]
    fn bodies_list_every_item() {
        let rendered = render_expiry_digest(
            &[sample_item("Kettle", 5), sample_item("Toaster", 9)],
            14,
        );
        for body in [&rendered.html, &rendered.text] {
            assert!(body.contains("Kettle"));
            assert!(body.contains("Toaster"));
            assert!(body.contains("14 days"));
        }
        assert!(rendered.html.contains("Jan 1, 2025"));
    }

    #[test]
    fn missing_retailer_renders_as_na() {
        let mut item = sample_item("Kettle", 5);
        item.retailer = None;
        let rendered = render_expiry_digest(&[item], 30);
        assert!(rendered.text.contains("(N/A)"));
    }
}
