use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::enroll_recipient::*;
use lecture_alerts_domain::{Enrollment, ID};
use lecture_alerts_infra::LectureContext;

pub async fn enroll_recipient_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = EnrollRecipientUseCase {
        course_id: path_params.course_id,
        recipient_id: body.recipient_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|enrollment| HttpResponse::Created().json(APIResponse::new(enrollment)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct EnrollRecipientUseCase {
    pub course_id: ID,
    pub recipient_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    CourseNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::CourseNotFound(course_id) => Self::NotFound(format!(
                "The course with id: {}, was not found.",
                course_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for EnrollRecipientUseCase {
    type Response = Enrollment;

    type Error = UseCaseError;

    const NAME: &'static str = "EnrollRecipient";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.courses.find(&self.course_id).await.is_none() {
            return Err(UseCaseError::CourseNotFound(self.course_id));
        }

        let enrollment = Enrollment::new(
            self.course_id,
            self.recipient_id,
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .enrollments
            .insert_if_absent(&enrollment)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::*;

    #[actix_web::test]
    async fn enrolls_recipient() {
        let TestContext { ctx, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let recipient_id = ID::new();

        let enrollment = execute(
            EnrollRecipientUseCase {
                course_id: course.id,
                recipient_id,
            },
            &ctx,
        )
        .await
        .unwrap();
        assert!(enrollment.notifications_enabled);
        assert!(ctx
            .repos
            .enrollments
            .find(&course.id, &recipient_id)
            .await
            .is_some());

        let res = execute(
            EnrollRecipientUseCase {
                course_id: ID::new(),
                recipient_id,
            },
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseError::CourseNotFound(_))));
    }
}
