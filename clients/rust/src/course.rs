use crate::{APIResponse, BaseClient, ID};
use lecture_alerts_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct CourseClient {
    base: Arc<BaseClient>,
}

pub type CreateCourseInput = create_course::RequestBody;

pub struct GetUpcomingLecturesInput {
    pub course_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
}

impl CourseClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateCourseInput,
    ) -> APIResponse<create_course::APIResponse> {
        self.base
            .post(input, "courses".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, course_id: ID) -> APIResponse<get_course::APIResponse> {
        self.base
            .get(format!("courses/{}", course_id), StatusCode::OK)
            .await
    }

    pub async fn join(
        &self,
        join_code: String,
        recipient_id: ID,
    ) -> APIResponse<join_course::APIResponse> {
        let body = join_course::RequestBody {
            join_code,
            recipient_id,
        };
        self.base
            .post(body, "courses/join".into(), StatusCode::OK)
            .await
    }

    pub async fn enroll(
        &self,
        course_id: ID,
        recipient_id: ID,
    ) -> APIResponse<enroll_recipient::APIResponse> {
        let body = enroll_recipient::RequestBody { recipient_id };
        self.base
            .post(
                body,
                format!("courses/{}/enrollments", course_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn unenroll(
        &self,
        course_id: ID,
        recipient_id: ID,
    ) -> APIResponse<unenroll_recipient::APIResponse> {
        self.base
            .delete(
                format!("courses/{}/enrollments/{}", course_id, recipient_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn set_notifications_enabled(
        &self,
        course_id: ID,
        recipient_id: ID,
        notifications_enabled: bool,
    ) -> APIResponse<set_notification_preference::APIResponse> {
        let body = set_notification_preference::RequestBody {
            notifications_enabled,
        };
        self.base
            .put(
                body,
                format!("courses/{}/enrollments/{}", course_id, recipient_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn upcoming_lectures(
        &self,
        input: GetUpcomingLecturesInput,
    ) -> APIResponse<get_upcoming_lectures::APIResponse> {
        self.base
            .get(
                format!(
                    "courses/{}/lectures?startTs={}&endTs={}",
                    input.course_id, input.start_ts, input.end_ts
                ),
                StatusCode::OK,
            )
            .await
    }
}
