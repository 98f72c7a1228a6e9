use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::get_delivery_status::*;
use lecture_alerts_domain::{DeliveryRecord, JobId};
use lecture_alerts_infra::LectureContext;

pub async fn get_delivery_status_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetDeliveryStatusUseCase {
        job_id: path_params.into_inner().job_id,
    };

    match execute(usecase, &ctx).await {
        Ok(records) => Ok(HttpResponse::Ok().json(APIResponse::new(records))),
        Err(e) => match e {},
    }
}

/// Every `DeliveryRecord` of a job. Empty for jobs that were never
/// dispatched.
#[derive(Debug)]
pub struct GetDeliveryStatusUseCase {
    pub job_id: JobId,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDeliveryStatusUseCase {
    type Response = Vec<DeliveryRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetDeliveryStatus";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.deliveries.find_by_job(&self.job_id).await)
    }
}
