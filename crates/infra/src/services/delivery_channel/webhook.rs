use super::IDeliveryChannel;
use lecture_alerts_domain::{DeliveryOutcome, NotificationPayload, ID};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, warn};

pub const DELIVERY_WEBHOOK_KEY_HEADER: &str = "lecture-alerts-webhook-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryWebhookBody<'a> {
    recipient_id: &'a ID,
    notification: &'a NotificationPayload,
}

/// Hands notifications to an external push service over HTTP
pub struct WebhookDeliveryChannel {
    client: Client,
    url: String,
    key: String,
}

impl WebhookDeliveryChannel {
    /// Requests that get no response within `timeout` count as failed
    pub fn new(url: String, key: String, timeout: Duration) -> Self {
        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!(
                    "Unable to build delivery webhook client with a timeout. Err: {:?}",
                    e
                );
                Client::new()
            }
        };
        Self { client, url, key }
    }
}

#[async_trait::async_trait]
impl IDeliveryChannel for WebhookDeliveryChannel {
    async fn send(&self, recipient_id: &ID, payload: &NotificationPayload) -> DeliveryOutcome {
        let body = DeliveryWebhookBody {
            recipient_id,
            notification: payload,
        };
        match self
            .client
            .post(&self.url)
            .header(DELIVERY_WEBHOOK_KEY_HEADER, &self.key)
            .json(&body)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => DeliveryOutcome::Delivered,
            Ok(res) => {
                error!(
                    "[Unexpected Response] Delivery webhook responded with status: {}",
                    res.status()
                );
                DeliveryOutcome::Failed(format!("Webhook responded with status {}", res.status()))
            }
            Err(e) => {
                error!(
                    "[Network Error] Delivery webhook error. Error message: {:?}",
                    e
                );
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecture_alerts_domain::NotificationKind;

    #[test]
    fn webhook_body_is_camel_case() {
        let recipient_id = ID::new();
        let payload = NotificationPayload {
            lecture_id: ID::new(),
            course_id: ID::new(),
            kind: NotificationKind::Reminder,
            title: "Databases".into(),
            start_ts: 1000,
            location: None,
            message: None,
        };
        let body = serde_json::to_value(DeliveryWebhookBody {
            recipient_id: &recipient_id,
            notification: &payload,
        })
        .unwrap();

        assert_eq!(body["recipientId"], recipient_id.to_string());
        assert_eq!(body["notification"]["startTs"], 1000);
        assert_eq!(body["notification"]["kind"], "reminder");
    }

    #[tokio::test]
    async fn send_fails_when_receiver_never_answers() {
        // Accepts connections through the backlog but never responds
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/deliveries", listener.local_addr().unwrap());
        let channel =
            WebhookDeliveryChannel::new(url, "secret".into(), Duration::from_millis(200));
        let payload = NotificationPayload {
            lecture_id: ID::new(),
            course_id: ID::new(),
            kind: NotificationKind::Reminder,
            title: "Databases".into(),
            start_ts: 1000,
            location: None,
            message: None,
        };

        let outcome = channel.send(&ID::new(), &payload).await;
        assert!(matches!(outcome, DeliveryOutcome::Failed(_)));
        drop(listener);
    }
}
