use lecture_alerts_domain::{AttendanceRecord, AttendanceStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordDTO {
    pub lecture_id: ID,
    pub recipient_id: ID,
    pub status: AttendanceStatus,
    pub marked_at: Option<i64>,
}

impl AttendanceRecordDTO {
    pub fn new(record: AttendanceRecord) -> Self {
        Self {
            lecture_id: record.lecture_id,
            recipient_id: record.recipient_id,
            status: record.status,
            marked_at: record.marked_at,
        }
    }
}
