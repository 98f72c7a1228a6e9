use crate::{
    notification::{JobId, NotificationJob, NotificationPayload},
    retry::RetryPolicy,
    shared::entity::ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryStatus {
    Pending,
    Delivered,
    Failed,
    Acknowledged,
}

/// Result of handing a payload to a delivery channel
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(String),
}

/// Delivery state of one `NotificationJob` for one recipient.
///
/// There is at most one record per (job, recipient). Retries mutate the
/// record in place and records are never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRecord {
    pub job_id: JobId,
    pub recipient_id: ID,
    pub status: DeliveryStatus,
    pub attempts: u32,
    pub last_attempt_at: Option<i64>,
    /// When a failed delivery may be tried again. `None` when no further
    /// attempt is planned.
    pub next_attempt_at: Option<i64>,
    /// Set while an attempt is awaiting the channel. Attempts on a record
    /// never overlap.
    pub in_flight: bool,
    pub last_error: Option<String>,
    pub acknowledged_at: Option<i64>,
    pub created: i64,
    pub payload: NotificationPayload,
}

impl DeliveryRecord {
    pub fn new(job: &NotificationJob, recipient_id: ID, now: i64) -> Self {
        Self {
            job_id: job.id.clone(),
            recipient_id,
            status: DeliveryStatus::Pending,
            attempts: 0,
            last_attempt_at: None,
            next_attempt_at: Some(now),
            in_flight: false,
            last_error: None,
            acknowledged_at: None,
            created: now,
            payload: job.payload.clone(),
        }
    }

    pub fn can_attempt(&self, policy: &RetryPolicy) -> bool {
        !self.in_flight
            && matches!(self.status, DeliveryStatus::Pending | DeliveryStatus::Failed)
            && policy.should_retry(self.attempts)
    }

    /// A failed record whose backoff has elapsed
    pub fn is_due_for_retry(&self, now: i64, policy: &RetryPolicy) -> bool {
        self.status == DeliveryStatus::Failed
            && self.can_attempt(policy)
            && self.next_attempt_at.map(|ts| ts <= now).unwrap_or(false)
    }

    pub fn is_exhausted(&self, policy: &RetryPolicy) -> bool {
        self.status == DeliveryStatus::Failed && !policy.should_retry(self.attempts)
    }

    pub fn begin_attempt(&mut self, now: i64) {
        self.in_flight = true;
        self.attempts += 1;
        self.last_attempt_at = Some(now);
    }

    pub fn record_outcome(&mut self, outcome: DeliveryOutcome, now: i64, policy: &RetryPolicy) {
        self.in_flight = false;
        match outcome {
            DeliveryOutcome::Delivered => {
                self.status = DeliveryStatus::Delivered;
                self.next_attempt_at = None;
                self.last_error = None;
            }
            DeliveryOutcome::Failed(reason) => {
                self.status = DeliveryStatus::Failed;
                self.last_error = Some(reason);
                self.next_attempt_at = if policy.should_retry(self.attempts) {
                    Some(now + policy.delay_for_attempt(self.attempts))
                } else {
                    None
                };
            }
        }
    }

    /// Returns `false` and leaves the record untouched unless it is
    /// `Delivered`.
    pub fn acknowledge(&mut self, now: i64) -> bool {
        if self.status != DeliveryStatus::Delivered {
            return false;
        }
        self.status = DeliveryStatus::Acknowledged;
        self.acknowledged_at = Some(now);
        true
    }
}
