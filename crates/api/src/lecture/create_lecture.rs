use super::expand_series::{initial_occurrences, materialize_occurrences, schedule_next_expansion};
use super::subscribers::ScheduleNotificationsOnLectureCreated;
use crate::error::ApiError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::create_lecture::*;
use lecture_alerts_domain::{Lecture, LectureError, LectureState, RRuleOptions, ID};
use lecture_alerts_infra::LectureContext;
use tracing::error;

pub async fn create_lecture_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = CreateLectureUseCase {
        course_id: body.course_id,
        lecturer_id: body.lecturer_id,
        title: body.title,
        description: body.description,
        location: body.location,
        start_ts: body.start_ts,
        duration: body.duration,
        recurrence: body.recurrence,
        idempotency_key: body.idempotency_key,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.lecture)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateLectureUseCase {
    pub course_id: ID,
    pub lecturer_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_ts: i64,
    pub duration: i64,
    pub recurrence: Option<RRuleOptions>,
    pub idempotency_key: Option<String>,
}

#[derive(Debug)]
pub struct CreatedLecture {
    pub lecture: Lecture,
    /// Occurrences materialized for a recurring lecture
    pub occurrences: Vec<Lecture>,
    /// `false` when the idempotency key was used before and `lecture` is the
    /// one created back then
    pub newly_created: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidLecture(String),
    CourseNotFound(ID),
    InvalidRecurrenceRule,
    IdempotencyKeyInUse(String),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidLecture(msg) => Self::BadClientData(msg),
            UseCaseError::CourseNotFound(course_id) => Self::BadClientData(format!(
                "The course with id: {}, was not found.",
                course_id
            )),
            UseCaseError::InvalidRecurrenceRule => {
                Self::BadClientData("Invalid recurrence rule specified for the lecture".into())
            }
            UseCaseError::IdempotencyKeyInUse(key) => Self::Conflict(format!(
                "A lecture with the idempotency key: {} is still being created",
                key
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<LectureError> for UseCaseError {
    fn from(e: LectureError) -> Self {
        Self::InvalidLecture(e.to_string())
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateLectureUseCase {
    type Response = CreatedLecture;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateLecture";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        Lecture::validate_title(&self.title)?;
        Lecture::validate_schedule(self.start_ts, self.duration, now)?;
        if let Some(rrule) = &self.recurrence {
            if !rrule.is_valid(self.start_ts) {
                return Err(UseCaseError::InvalidRecurrenceRule);
            }
        }

        let course = ctx
            .repos
            .courses
            .find(&self.course_id)
            .await
            .ok_or(UseCaseError::CourseNotFound(self.course_id))?;

        let mut lecture = Lecture {
            id: Default::default(),
            course_id: course.id,
            lecturer_id: self.lecturer_id,
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            start_ts: self.start_ts,
            duration: self.duration,
            state: LectureState::Scheduled,
            recurrence: self.recurrence.clone(),
            series_id: None,
            materialized_until: None,
            schedule_revision: 0,
            version: 0,
            created: now,
            updated: now,
        };

        let mut claimed_key = None;
        if let Some(key) = &self.idempotency_key {
            let key = format!("lecture:{}:{}", course.id, key);
            let claimed = ctx
                .repos
                .key_values
                .set_if_absent(&key, &lecture.id.as_string())
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if let Some(existing_id) = claimed {
                return existing_lecture(&key, &existing_id, ctx).await;
            }
            claimed_key = Some(key);
        }

        let starts = initial_occurrences(&lecture, &course, ctx.config.recurrence_lookahead);
        lecture.materialized_until = starts.last().copied();

        if let Err(e) = ctx.repos.lectures.insert(&lecture).await {
            error!("Unable to store lecture. Err: {:?}", e);
            // Let a retry with the same key create the lecture
            if let Some(key) = &claimed_key {
                ctx.repos.key_values.delete(key).await;
            }
            return Err(UseCaseError::StorageError);
        }

        let occurrences = if lecture.is_series_root() {
            let occurrences = materialize_occurrences(&lecture, &starts, ctx)
                .await
                .map_err(|e| {
                    error!("Unable to store lecture series: {}. Err: {:?}", lecture.id, e);
                    UseCaseError::StorageError
                })?;
            schedule_next_expansion(&lecture, now, ctx).await;
            occurrences
        } else {
            Vec::new()
        };

        Ok(CreatedLecture {
            lecture,
            occurrences,
            newly_created: true,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleNotificationsOnLectureCreated)]
    }
}

async fn existing_lecture(
    key: &str,
    existing_id: &str,
    ctx: &LectureContext,
) -> Result<CreatedLecture, UseCaseError> {
    let lecture = match existing_id.parse::<ID>() {
        Ok(id) => ctx.repos.lectures.find(&id).await,
        Err(_) => None,
    };
    match lecture {
        Some(lecture) => {
            let occurrences = ctx.repos.lectures.find_by_series(&lecture.id).await;
            Ok(CreatedLecture {
                lecture,
                occurrences,
                newly_created: false,
            })
        }
        // The request that claimed the key has not stored its lecture yet
        None => Err(UseCaseError::IdempotencyKeyInUse(key.to_string())),
    }
}
