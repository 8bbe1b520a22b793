//! Email channel implementation over the mail provider client.

use crate::client::{EmailError, MailClient, OutboundEmail};
use crate::render::{render_expiry_digest, render_test_message};
use tracing::info;
use warrantify_common::models::ExpiringWarranty;
use warrantify_common::services::{BoxFuture, EmailChannel, EmailReceipt};
use warrantify_config::EmailConfig;

/// The email notification channel.
///
/// Sends one aggregated digest per tenant per run. Delivery is attempted
/// exactly once; a failure is returned to the caller with the provider's
/// reason and is never retried here.
#[derive(Debug, Clone)]
pub struct EmailDispatchService {
    client: MailClient,
}

impl EmailDispatchService {
    /// Create a new email channel from the provider configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: MailClient::new(config),
        }
    }
}

impl EmailChannel for EmailDispatchService {
    type Error = EmailError;

    fn send_expiry_digest(
        &self,
        to: &str,
        items: &[ExpiringWarranty],
        threshold_days: u16,
    ) -> BoxFuture<'_, EmailReceipt, Self::Error> {
        let to = to.to_string();
        let items = items.to_vec();

        Box::pin(async move {
            if items.is_empty() {
                return Err(EmailError::InvalidMessage(
                    "no expiring items to report".to_string(),
                ));
            }

            let rendered = render_expiry_digest(&items, threshold_days);
            let message = OutboundEmail {
                from: self.client.sender(),
                to: to.clone(),
                subject: rendered.subject,
                html: rendered.html,
                text: rendered.text,
            };

            let response = self.client.send(message).await?;
            info!(
                "Expiry digest with {} item(s) sent to {}: {}",
                items.len(),
                to,
                response.id
            );

            Ok(EmailReceipt {
                message_id: response.id,
                status: response.status,
            })
        })
    }

    fn send_test_message(&self, to: &str) -> BoxFuture<'_, EmailReceipt, Self::Error> {
        let to = to.to_string();

        Box::pin(async move {
            let rendered = render_test_message();
            let message = OutboundEmail {
                from: self.client.sender(),
                to: to.clone(),
                subject: rendered.subject,
                html: rendered.html,
                text: rendered.text,
            };

            let response = self.client.send(message).await?;
            info!("Test email sent to {}: {}", to, response.id);

            Ok(EmailReceipt {
                message_id: response.id,
                status: response.status,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use warrantify_common::services::EmailChannel as _;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn channel_for(server: &MockServer) -> EmailDispatchService {
        EmailDispatchService::new(EmailConfig {
            api_url: format!("{}/v1/send", server.uri()),
            api_key: "test-key".to_string(),
            from_address: "alerts@warrantify.test".to_string(),
            from_name: Some("Warrantify Alerts".to_string()),
        })
    }

    fn expiring(name: &str) -> ExpiringWarranty {
        ExpiringWarranty {
            id: format!("w-{}", name),
            product_name: name.to_string(),
            retailer: None,
            days_remaining: 7,
            expiry_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn digest_is_delivered_with_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/send"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg-123",
                "status": "queued"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let channel = channel_for(&server);
        let receipt = channel
            .send_expiry_digest("user@example.com", &[expiring("Kettle")], 30)
            .await
            .expect("digest should be delivered");

        assert_eq!(receipt.message_id, "msg-123");
        assert_eq!(receipt.status, "queued");
    }

    #[tokio::test]
    async fn provider_rejection_carries_the_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("unknown sender domain"))
            .mount(&server)
            .await;

        let channel = channel_for(&server);
        let err = channel
            .send_expiry_digest("user@example.com", &[expiring("Kettle")], 30)
            .await
            .expect_err("provider rejection should surface");

        match err {
            EmailError::ApiError(reason) => assert!(reason.contains("unknown sender domain")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_digest_is_rejected_without_a_request() {
        let server = MockServer::start().await;
        let channel = channel_for(&server);

        let err = channel
            .send_expiry_digest("user@example.com", &[], 30)
            .await
            .expect_err("empty digest must not be sent");

        assert!(matches!(err, EmailError::InvalidMessage(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
