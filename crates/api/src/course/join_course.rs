use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::join_course::*;
use lecture_alerts_domain::{Enrollment, ID};
use lecture_alerts_infra::LectureContext;

pub async fn join_course_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = JoinCourseUseCase {
        join_code: body.join_code,
        recipient_id: body.recipient_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|enrollment| HttpResponse::Ok().json(APIResponse::new(enrollment)))
        .map_err(ApiError::from)
}

/// Enrolls a recipient in the `Course` with the given join code. Joining
/// a course twice keeps the first `Enrollment`.
#[derive(Debug)]
pub struct JoinCourseUseCase {
    pub join_code: String,
    pub recipient_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    UnknownJoinCode(String),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UnknownJoinCode(code) => {
                Self::NotFound(format!("No course has the join code: {}", code))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for JoinCourseUseCase {
    type Response = Enrollment;

    type Error = UseCaseError;

    const NAME: &'static str = "JoinCourse";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let course = ctx
            .repos
            .courses
            .find_by_join_code(&self.join_code)
            .await
            .ok_or_else(|| UseCaseError::UnknownJoinCode(self.join_code.clone()))?;

        let enrollment = Enrollment::new(
            course.id,
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
