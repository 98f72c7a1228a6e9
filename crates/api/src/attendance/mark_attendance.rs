use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::mark_attendance::*;
use lecture_alerts_domain::{LectureState, ID};
use lecture_alerts_infra::LectureContext;
use tracing::error;

pub async fn mark_attendance_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = MarkAttendanceUseCase {
        lecture_id: path_params.lecture_id,
        recipient_id: body.recipient_id,
        at: ctx.sys.get_timestamp_millis(),
    };

    execute(usecase, &ctx)
        .await
        .map(|marked_at| {
            HttpResponse::Ok().json(APIResponse {
                lecture_id: path_params.lecture_id,
                recipient_id: body.recipient_id,
                marked_at,
            })
        })
        .map_err(ApiError::from)
}

/// Checks a recipient in to a lecture. Returns when the recipient was first
/// marked present, so checking in twice keeps the original time.
#[derive(Debug)]
pub struct MarkAttendanceUseCase {
    pub lecture_id: ID,
    pub recipient_id: ID,
    pub at: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    LectureNotFound(ID),
    NotEnrolled(ID),
    LectureNotActive(LectureState),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::LectureNotFound(lecture_id) => Self::NotFound(format!(
                "The lecture with id: {}, was not found.",
                lecture_id
            )),
            UseCaseError::NotEnrolled(recipient_id) => Self::NotEnrolled(format!(
                "The recipient with id: {} is not enrolled in the course of the lecture",
                recipient_id
            )),
            UseCaseError::LectureNotActive(state) => Self::Conflict(format!(
                "Attendance cannot be marked for a lecture that is {}",
                state
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkAttendanceUseCase {
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkAttendance";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let lecture = ctx
            .repos
            .lectures
            .find(&self.lecture_id)
            .await
            .ok_or(UseCaseError::LectureNotFound(self.lecture_id))?;

        if let Some(record) = ctx
            .repos
            .attendance
            .find(&self.lecture_id, &self.recipient_id)
            .await
        {
            if let (true, Some(marked_at)) = (record.is_present(), record.marked_at) {
                return Ok(marked_at);
            }
        }

        if ctx
            .repos
            .enrollments
            .find(&lecture.course_id, &self.recipient_id)
            .await
            .is_none()
        {
            return Err(UseCaseError::NotEnrolled(self.recipient_id));
        }
        if !lecture.accepts_attendance(self.at, ctx.config.attendance_grace_period) {
            return Err(UseCaseError::LectureNotActive(lecture.state));
        }

        ctx.repos
            .attendance
            .mark_present(&self.lecture_id, &self.recipient_id, self.at)
            .await
            .map_err(|e| {
                error!("Unable to mark attendance. Err: {:?}", e);
                UseCaseError::StorageError
            })
    }
}
