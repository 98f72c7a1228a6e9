use super::subscribers::SyncNotificationsOnLectureRescheduled;
use crate::{
    error::ApiError,
    shared::{
        mutate_lecture::{mutate_lecture, MutateLectureError},
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::update_lecture::*;
use lecture_alerts_domain::{Lecture, LectureError, LecturePatch, LectureState, ID};
use lecture_alerts_infra::LectureContext;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::NotFound(lecture_id) => ApiError::NotFound(format!(
            "The lecture with id: {}, was not found.",
            lecture_id
        )),
        UseCaseError::InvalidLecture(msg) => ApiError::BadClientData(msg),
        UseCaseError::InvalidState(state) => ApiError::Conflict(format!(
            "The lecture is {} and can no longer be changed that way",
            state
        )),
        UseCaseError::Contention => {
            ApiError::Conflict("The lecture is being changed by someone else, try again".into())
        }
        UseCaseError::StorageError => ApiError::InternalError,
    }
}

pub async fn update_lecture_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = UpdateLectureUseCase {
        lecture_id: path_params.lecture_id,
        patch: LecturePatch {
            title: body.title,
            description: body.description,
            location: body.location,
            start_ts: body.start_ts,
            duration: body.duration,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.lecture)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct UpdateLectureUseCase {
    pub lecture_id: ID,
    pub patch: LecturePatch,
}

#[derive(Debug)]
pub struct UpdatedLecture {
    pub lecture: Lecture,
    /// The start or duration changed
    pub rescheduled: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidLecture(String),
    InvalidState(LectureState),
    Contention,
    StorageError,
}

impl UseCaseError {
    fn from_mutation(e: MutateLectureError<LectureError>, lecture_id: ID) -> Self {
        match e {
            MutateLectureError::NotFound => Self::NotFound(lecture_id),
            MutateLectureError::Rejected(LectureError::Validation(msg)) => {
                Self::InvalidLecture(msg)
            }
            MutateLectureError::Rejected(LectureError::InvalidState { state, .. }) => {
                Self::InvalidState(state)
            }
            MutateLectureError::Contention => Self::Contention,
            MutateLectureError::StorageError => Self::StorageError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateLectureUseCase {
    type Response = UpdatedLecture;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateLecture";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let patch = &self.patch;
        let (lecture, rescheduled) = mutate_lecture(&self.lecture_id, ctx, |lecture, now| {
            lecture.apply_patch(patch, now).map(Some)
        })
        .await
        .map_err(|e| UseCaseError::from_mutation(e, self.lecture_id))?;

        Ok(UpdatedLecture {
            lecture,
            rescheduled: rescheduled.unwrap_or(false),
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncNotificationsOnLectureRescheduled)]
    }
}
