use crate::dtos::AttendanceRecordDTO;
use lecture_alerts_domain::{AttendanceRecord, AttendanceSummary, ID};
use serde::{Deserialize, Serialize};

pub mod mark_attendance {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub lecture_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub recipient_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub lecture_id: ID,
        pub recipient_id: ID,
        /// When the recipient was first marked present
        pub marked_at: i64,
    }
}

pub mod get_attendance_summary {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub lecture_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub lecture_id: ID,
        pub present: usize,
        pub total: usize,
        pub records: Vec<AttendanceRecordDTO>,
    }

    impl APIResponse {
        pub fn new(summary: AttendanceSummary, records: Vec<AttendanceRecord>) -> Self {
            Self {
                lecture_id: summary.lecture_id,
                present: summary.present,
                total: summary.total,
                records: records.into_iter().map(AttendanceRecordDTO::new).collect(),
            }
        }
    }
}
