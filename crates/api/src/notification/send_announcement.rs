use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::send_announcement::*;
use lecture_alerts_domain::{LectureState, NotificationJob, ID};
use lecture_alerts_infra::LectureContext;
use tracing::error;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::NotFound(lecture_id) => ApiError::NotFound(format!(
            "The lecture with id: {}, was not found.",
            lecture_id
        )),
        UseCaseError::EmptyMessage => {
            ApiError::BadClientData("The announcement message cannot be empty".into())
        }
        UseCaseError::InvalidIdempotencyKey(msg) => ApiError::BadClientData(msg),
        UseCaseError::InvalidState(state) => ApiError::Conflict(format!(
            "Cannot send an announcement about a lecture that is {}",
            state
        )),
        UseCaseError::StorageError => ApiError::InternalError,
    }
}

pub async fn send_announcement_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = SendAnnouncementUseCase {
        lecture_id: path_params.lecture_id,
        message: body.message,
        idempotency_key: body.idempotency_key,
    };

    execute(usecase, &ctx)
        .await
        .map(|job| HttpResponse::Created().json(APIResponse::new(job)))
        .map_err(handle_error)
}

/// Queues an `AdHocAnnouncement` about a lecture for immediate dispatch to
/// everyone enrolled in its course.
///
/// The job id is derived from the idempotency key, so sending the same
/// announcement twice reaches every recipient once.
#[derive(Debug)]
pub struct SendAnnouncementUseCase {
    pub lecture_id: ID,
    pub message: String,
    pub idempotency_key: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    EmptyMessage,
    InvalidIdempotencyKey(String),
    InvalidState(LectureState),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendAnnouncementUseCase {
    type Response = NotificationJob;

    type Error = UseCaseError;

    const NAME: &'static str = "SendAnnouncement";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let lecture = ctx
            .repos
            .lectures
            .find(&self.lecture_id)
            .await
            .ok_or(UseCaseError::NotFound(self.lecture_id))?;
        if lecture.state.is_terminal() {
            return Err(UseCaseError::InvalidState(lecture.state));
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(UseCaseError::EmptyMessage);
        }

        let job = NotificationJob::announcement(
            &lecture,
            message.to_string(),
            &self.idempotency_key,
            ctx.sys.get_timestamp_millis(),
        )
        .map_err(|e| UseCaseError::InvalidIdempotencyKey(e.to_string()))?;

        ctx.repos
            .notification_jobs
            .insert(&[job.clone()])
            .await
            .map_err(|e| {
                error!("Unable to queue announcement. Err: {:?}", e);
                UseCaseError::StorageError
            })?;
        Ok(job)
    }
}
