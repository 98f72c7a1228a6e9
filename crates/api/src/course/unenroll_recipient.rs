use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::unenroll_recipient::*;
use lecture_alerts_domain::{Enrollment, ID};
use lecture_alerts_infra::LectureContext;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::CourseNotFound(course_id) => ApiError::NotFound(format!(
            "The course with id: {}, was not found.",
            course_id
        )),
    }
}

pub async fn unenroll_recipient_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = UnenrollRecipientUseCase {
        course_id: path_params.course_id,
        recipient_id: path_params.recipient_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|enrollment| HttpResponse::Ok().json(APIResponse::new(enrollment)))
        .map_err(handle_error)
}

/// Removes the recipient from the course. Deliveries already created for
/// the recipient are kept, later notifications of the course skip them.
#[derive(Debug)]
pub struct UnenrollRecipientUseCase {
    pub course_id: ID,
    pub recipient_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    CourseNotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for UnenrollRecipientUseCase {
    /// `None` when the recipient was not enrolled
    type Response = Option<Enrollment>;

    type Error = UseCaseError;

    const NAME: &'static str = "UnenrollRecipient";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.courses.find(&self.course_id).await.is_none() {
            return Err(UseCaseError::CourseNotFound(self.course_id));
        }
        Ok(ctx
            .repos
            .enrollments
            .delete(&self.course_id, &self.recipient_id)
            .await)
    }
}
