//! Push channel implementation over the FCM client.
//!
//! The FCM HTTP v1 API takes one registration token per request, so a
//! multicast is a sequential fan-out across the tenant's tokens. The bearer
//! token is fetched once per multicast and reused for every request in it.

use crate::client::{FcmClient, FcmMessage, Message, Notification, PushError};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use warrantify_common::models::ExpiringWarranty;
use warrantify_common::services::{BoxFuture, PushChannel, PushReceipt};
use warrantify_config::FirebaseConfig;

/// The push notification channel.
pub struct PushDispatchService {
    client: FcmClient,
}

impl PushDispatchService {
    /// Create a new push channel from the Firebase configuration.
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            client: FcmClient::new(config),
        }
    }
}

// Title, body and data payload for one expiring-warranty alert.
pub(crate) fn alert_content(item: &ExpiringWarranty) -> (String, String, HashMap<String, String>) {
    let title = "Warranty expiring soon".to_string();
    let body = format!(
        "{} warranty expires in {} day{}",
        item.product_name,
        item.days_remaining,
        if item.days_remaining == 1 { "" } else { "s" }
    );

    let mut data = HashMap::new();
    data.insert("type".to_string(), "warranty_expiry".to_string());
    data.insert("warranty_id".to_string(), item.id.clone());
    data.insert("product_name".to_string(), item.product_name.clone());
    data.insert(
        "days_remaining".to_string(),
        item.days_remaining.to_string(),
    );
    data.insert("expiry_date".to_string(), item.expiry_date.to_string());

    (title, body, data)
}

impl PushChannel for PushDispatchService {
    type Error = PushError;

    fn send_expiry_alert(
        &self,
        tokens: &[String],
        item: &ExpiringWarranty,
    ) -> BoxFuture<'_, PushReceipt, Self::Error> {
        let tokens = tokens.to_vec();
        let item = item.clone();

        Box::pin(async move {
            if tokens.is_empty() {
                return Err(PushError::InvalidMessage(
                    "no device tokens to deliver to".to_string(),
                ));
            }

            let url = self.client.endpoint()?;
            let bearer = self.client.bearer().await?;
            let (title, body, data) = alert_content(&item);

            let mut receipt = PushReceipt::default();
            for token in tokens {
                let message = FcmMessage {
                    message: Message {
                        token: token.clone(),
                        notification: Notification {
                            title: title.clone(),
                            body: body.clone(),
                        },
                        data: Some(data.clone()),
                    },
                };

                match self.client.send_with_bearer(&url, &bearer, message).await {
                    Ok(name) => {
                        debug!("Push delivered for {}: {}", item.product_name, name);
                        receipt.delivered += 1;
                    }
                    Err(PushError::Unregistered(stale)) => {
                        warn!("Device token reported unregistered by provider");
                        receipt.failed += 1;
                        receipt.invalid_tokens.push(stale);
                    }
                    Err(err) => {
                        warn!("Push delivery failed for {}: {}", item.product_name, err);
                        receipt.failed += 1;
                    }
                }
            }

            info!(
                "Push multicast for {}: {} delivered, {} failed",
                item.product_name, receipt.delivered, receipt.failed
            );
            Ok(receipt)
        })
    }
}
