use crate::{APIResponse, BaseClient, ID};
use lecture_alerts_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AttendanceClient {
    base: Arc<BaseClient>,
}

impl AttendanceClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn mark(
        &self,
        lecture_id: ID,
        recipient_id: ID,
    ) -> APIResponse<mark_attendance::APIResponse> {
        let body = mark_attendance::RequestBody { recipient_id };
        self.base
            .post(
                body,
                format!("lectures/{}/attendance", lecture_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn summary(
        &self,
        lecture_id: ID,
    ) -> APIResponse<get_attendance_summary::APIResponse> {
        self.base
            .get(format!("lectures/{}/attendance", lecture_id), StatusCode::OK)
            .await
    }
}
