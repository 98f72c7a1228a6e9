mod recording;
mod webhook;

use lecture_alerts_domain::{DeliveryOutcome, NotificationPayload, ID};
pub use recording::{RecordingDeliveryChannel, SentNotification};
use tracing::info;
pub use webhook::WebhookDeliveryChannel;

/// Transport that gets a notification to a recipient's devices.
///
/// Implementations report failures through the returned `DeliveryOutcome`
/// and never retry on their own, retries are scheduled by the caller.
#[async_trait::async_trait]
pub trait IDeliveryChannel: Send + Sync {
    async fn send(&self, recipient_id: &ID, payload: &NotificationPayload) -> DeliveryOutcome;
}

/// Used when no transport is configured. Only logs the notification.
pub struct LogDeliveryChannel;

#[async_trait::async_trait]
impl IDeliveryChannel for LogDeliveryChannel {
    async fn send(&self, recipient_id: &ID, payload: &NotificationPayload) -> DeliveryOutcome {
        info!(
            recipient_id = %recipient_id,
            lecture_id = %payload.lecture_id,
            kind = %payload.kind,
            "Delivering notification: {}",
            payload.title
        );
        DeliveryOutcome::Delivered
    }
}
