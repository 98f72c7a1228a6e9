use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::set_notification_preference::*;
use lecture_alerts_domain::{Enrollment, ID};
use lecture_alerts_infra::LectureContext;

pub async fn set_notification_preference_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = SetNotificationPreferenceUseCase {
        course_id: path_params.course_id,
        recipient_id: path_params.recipient_id,
        notifications_enabled: body.notifications_enabled,
    };

    execute(usecase, &ctx)
        .await
        .map(|enrollment| HttpResponse::Ok().json(APIResponse::new(enrollment)))
        .map_err(ApiError::from)
}

/// Mutes or unmutes reminders and announcements of a course for a
/// recipient
#[derive(Debug)]
pub struct SetNotificationPreferenceUseCase {
    pub course_id: ID,
    pub recipient_id: ID,
    pub notifications_enabled: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotEnrolled(ID),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotEnrolled(recipient_id) => Self::NotEnrolled(format!(
                "The recipient with id: {} is not enrolled in the course",
                recipient_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetNotificationPreferenceUseCase {
    type Response = Enrollment;

    type Error = UseCaseError;

    const NAME: &'static str = "SetNotificationPreference";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .enrollments
            .set_notifications_enabled(
                &self.course_id,
                &self.recipient_id,
                self.notifications_enabled,
            )
            .await
            .ok_or(UseCaseError::NotEnrolled(self.recipient_id))
    }
}
