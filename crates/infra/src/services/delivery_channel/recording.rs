use super::IDeliveryChannel;
use lecture_alerts_domain::{DeliveryOutcome, NotificationPayload, ID};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct SentNotification {
    pub recipient_id: ID,
    pub payload: NotificationPayload,
    pub outcome: DeliveryOutcome,
}

/// Channel that keeps every send in memory and fails on request
#[derive(Default)]
pub struct RecordingDeliveryChannel {
    sent: Mutex<Vec<SentNotification>>,
    /// Recipient to number of upcoming sends that should fail
    failures: Mutex<HashMap<ID, u32>>,
    /// Recipients whose sends never complete
    unresponsive: Mutex<HashSet<ID>>,
}

impl RecordingDeliveryChannel {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes the next `times` sends to the recipient fail
    pub fn fail_next(&self, recipient_id: ID, times: u32) {
        self.failures.lock().insert(recipient_id, times);
    }

    /// Makes every following send to the recipient hang forever, like a
    /// push service that accepts the connection but never answers
    pub fn never_respond_to(&self, recipient_id: ID) {
        self.unresponsive.lock().insert(recipient_id);
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().clone()
    }

    pub fn sent_to(&self, recipient_id: &ID) -> Vec<SentNotification> {
        self.sent
            .lock()
            .iter()
            .filter(|s| s.recipient_id == *recipient_id)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl IDeliveryChannel for RecordingDeliveryChannel {
    async fn send(&self, recipient_id: &ID, payload: &NotificationPayload) -> DeliveryOutcome {
        let hangs = self.unresponsive.lock().contains(recipient_id);
        if hangs {
            std::future::pending::<()>().await;
        }
        let outcome = {
            let mut failures = self.failures.lock();
            match failures.get_mut(recipient_id) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    DeliveryOutcome::Failed("Recipient unreachable".into())
                }
                _ => DeliveryOutcome::Delivered,
            }
        };
        self.sent.lock().push(SentNotification {
            recipient_id: *recipient_id,
            payload: payload.clone(),
            outcome: outcome.clone(),
        });
        outcome
    }
}
