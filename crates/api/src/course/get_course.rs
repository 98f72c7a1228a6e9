use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::get_course::*;
use lecture_alerts_domain::{Course, ID};
use lecture_alerts_infra::LectureContext;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::NotFound(course_id) => ApiError::NotFound(format!(
            "The course with id: {}, was not found.",
            course_id
        )),
    }
}

pub async fn get_course_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetCourseUseCase {
        course_id: path_params.course_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|course| HttpResponse::Ok().json(APIResponse::new(course)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetCourseUseCase {
    pub course_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCourseUseCase {
    type Response = Course;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCourse";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .courses
            .find(&self.course_id)
            .await
            .ok_or(UseCaseError::NotFound(self.course_id))
    }
}
