use super::subscribers::SyncNotificationsOnLectureCancelled;
use crate::{
    error::ApiError,
    shared::{
        mutate_lecture::{mutate_lecture, MutateLectureError},
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::cancel_lecture::*;
use lecture_alerts_domain::{Lecture, LectureError, LectureState, ID};
use lecture_alerts_infra::LectureContext;

pub async fn cancel_lecture_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = CancelLectureUseCase {
        lecture_id: path_params.lecture_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.lecture)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CancelLectureUseCase {
    pub lecture_id: ID,
}

#[derive(Debug)]
pub struct CancelledLecture {
    pub lecture: Lecture,
    /// `false` when the lecture had already been cancelled
    pub newly_cancelled: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidState(LectureState),
    Contention,
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(lecture_id) => Self::NotFound(format!(
                "The lecture with id: {}, was not found.",
                lecture_id
            )),
            UseCaseError::InvalidState(state) => {
                Self::Conflict(format!("A lecture that is {} cannot be cancelled", state))
            }
            UseCaseError::Contention => {
                Self::Conflict("The lecture is being changed by someone else, try again".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelLectureUseCase {
    type Response = CancelledLecture;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelLecture";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        // Nothing is saved when the lecture was already cancelled
        let res = mutate_lecture(&self.lecture_id, ctx, |lecture, now| {
            lecture.cancel(now).map(|newly| newly.then(|| ()))
        })
        .await;

        match res {
            Ok((lecture, cancelled)) => Ok(CancelledLecture {
                lecture,
                newly_cancelled: cancelled.is_some(),
            }),
            Err(MutateLectureError::NotFound) => Err(UseCaseError::NotFound(self.lecture_id)),
            Err(MutateLectureError::Rejected(LectureError::InvalidState { state, .. })) => {
                Err(UseCaseError::InvalidState(state))
            }
            Err(MutateLectureError::Contention) => Err(UseCaseError::Contention),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncNotificationsOnLectureCancelled)]
    }
}
