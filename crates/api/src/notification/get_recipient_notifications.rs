use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::get_recipient_notifications::*;
use lecture_alerts_domain::{DeliveryRecord, ID};
use lecture_alerts_infra::LectureContext;

pub async fn get_recipient_notifications_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetRecipientNotificationsUseCase {
        recipient_id: path_params.recipient_id,
    };

    match execute(usecase, &ctx).await {
        Ok(records) => Ok(HttpResponse::Ok().json(APIResponse::new(records))),
        Err(e) => match e {},
    }
}

/// The inbox of a recipient, newest first
#[derive(Debug)]
pub struct GetRecipientNotificationsUseCase {
    pub recipient_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRecipientNotificationsUseCase {
    type Response = Vec<DeliveryRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetRecipientNotifications";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let mut records = ctx
            .repos
            .deliveries
            .find_by_recipient(&self.recipient_id)
            .await;
        records.reverse();
        Ok(records)
    }
}
