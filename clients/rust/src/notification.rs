use crate::{APIResponse, BaseClient, JobId, ID};
use lecture_alerts_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn deliveries(
        &self,
        job_id: &JobId,
    ) -> APIResponse<get_delivery_status::APIResponse> {
        self.base
            .get(
                format!("notifications/{}/deliveries", job_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn acknowledge(
        &self,
        job_id: &JobId,
        recipient_id: ID,
    ) -> APIResponse<acknowledge_delivery::APIResponse> {
        self.base
            .post(
                (),
                format!("notifications/{}/deliveries/{}/ack", job_id, recipient_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn for_recipient(
        &self,
        recipient_id: ID,
    ) -> APIResponse<get_recipient_notifications::APIResponse> {
        self.base
            .get(
                format!("recipients/{}/notifications", recipient_id),
                StatusCode::OK,
            )
            .await
    }
}
