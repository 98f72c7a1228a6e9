use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::get_lecture::*;
use lecture_alerts_domain::{Lecture, ID};
use lecture_alerts_infra::LectureContext;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::NotFound(lecture_id) => ApiError::NotFound(format!(
            "The lecture with id: {}, was not found.",
            lecture_id
        )),
    }
}

pub async fn get_lecture_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetLectureUseCase {
        lecture_id: path_params.lecture_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|lecture| HttpResponse::Ok().json(APIResponse::new(lecture)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetLectureUseCase {
    pub lecture_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetLectureUseCase {
    type Response = Lecture;

    type Error = UseCaseError;

    const NAME: &'static str = "GetLecture";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .lectures
            .find(&self.lecture_id)
            .await
            .ok_or(UseCaseError::NotFound(self.lecture_id))
    }
}
