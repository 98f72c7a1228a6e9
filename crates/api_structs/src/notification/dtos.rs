use lecture_alerts_domain::{DeliveryRecord, DeliveryStatus, JobId, NotificationPayload, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecordDTO {
    pub job_id: JobId,
    pub recipient_id: ID,
    pub status: DeliveryStatus,
    pub attempts: u32,
    pub last_attempt_at: Option<i64>,
    pub next_attempt_at: Option<i64>,
    pub last_error: Option<String>,
    pub acknowledged_at: Option<i64>,
    pub created: i64,
    pub notification: NotificationPayload,
}

impl DeliveryRecordDTO {
    pub fn new(record: DeliveryRecord) -> Self {
        Self {
            job_id: record.job_id,
            recipient_id: record.recipient_id,
            status: record.status,
            attempts: record.attempts,
            last_attempt_at: record.last_attempt_at,
            next_attempt_at: record.next_attempt_at,
            last_error: record.last_error,
            acknowledged_at: record.acknowledged_at,
            created: record.created,
            notification: record.payload,
        }
    }
}
