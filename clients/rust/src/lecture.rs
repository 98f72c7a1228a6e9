use crate::{APIResponse, BaseClient, ID};
use lecture_alerts_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct LectureClient {
    base: Arc<BaseClient>,
}

pub type CreateLectureInput = create_lecture::RequestBody;

pub struct UpdateLectureInput {
    pub lecture_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_ts: Option<i64>,
    pub duration: Option<i64>,
}

pub struct SendAnnouncementInput {
    pub lecture_id: ID,
    pub message: String,
    pub idempotency_key: String,
}

impl LectureClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateLectureInput,
    ) -> APIResponse<create_lecture::APIResponse> {
        self.base
            .post(input, "lectures".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, lecture_id: ID) -> APIResponse<get_lecture::APIResponse> {
        self.base
            .get(format!("lectures/{}", lecture_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateLectureInput,
    ) -> APIResponse<update_lecture::APIResponse> {
        let body = update_lecture::RequestBody {
            title: input.title,
            description: input.description,
            location: input.location,
            start_ts: input.start_ts,
            duration: input.duration,
        };
        self.base
            .put(body, format!("lectures/{}", input.lecture_id), StatusCode::OK)
            .await
    }

    pub async fn cancel(&self, lecture_id: ID) -> APIResponse<cancel_lecture::APIResponse> {
        self.base
            .post(
                (),
                format!("lectures/{}/cancel", lecture_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn announce(
        &self,
        input: SendAnnouncementInput,
    ) -> APIResponse<send_announcement::APIResponse> {
        let body = send_announcement::RequestBody {
            message: input.message,
            idempotency_key: input.idempotency_key,
        };
        self.base
            .post(
                body,
                format!("lectures/{}/announcements", input.lecture_id),
                StatusCode::CREATED,
            )
            .await
    }
}
