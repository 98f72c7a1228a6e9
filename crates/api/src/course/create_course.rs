use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::create_course::*;
use lecture_alerts_domain::{Course, CourseSettings, Tz, ID};
use lecture_alerts_infra::LectureContext;
use lecture_alerts_utils::create_join_code;
use tracing::{error, warn};

const JOIN_CODE_LEN: usize = 8;
/// Join codes are random, so a collision is retried with a fresh code
const JOIN_CODE_ATTEMPTS: usize = 5;

pub async fn create_course_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = CreateCourseUseCase {
        name: body.name,
        lecturer_id: body.lecturer_id,
        timezone: body.timezone,
        week_start: body.week_start,
        idempotency_key: body.idempotency_key,
    };

    execute(usecase, &ctx)
        .await
        .map(|course| HttpResponse::Created().json(APIResponse::new(course)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateCourseUseCase {
    pub name: String,
    pub lecturer_id: ID,
    pub timezone: Option<Tz>,
    pub week_start: Option<usize>,
    pub idempotency_key: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidName,
    InvalidWeekStart(usize),
    IdempotencyKeyInUse(String),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidName => Self::BadClientData("The course name is required".into()),
            UseCaseError::InvalidWeekStart(week_start) => Self::BadClientData(format!(
                "Invalid week start: {}, must be between 0 and 6",
                week_start
            )),
            UseCaseError::IdempotencyKeyInUse(key) => Self::Conflict(format!(
                "A course with the idempotency key: {} is still being created",
                key
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCourseUseCase {
    type Response = Course;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateCourse";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::InvalidName);
        }
        let mut settings = CourseSettings::default();
        if let Some(timezone) = self.timezone {
            settings.timezone = timezone;
        }
        if let Some(week_start) = self.week_start {
            if week_start > 6 {
                return Err(UseCaseError::InvalidWeekStart(week_start));
            }
            settings.week_start = week_start;
        }

        let mut course = Course::new(
            self.name.trim().to_string(),
            self.lecturer_id,
            create_join_code(JOIN_CODE_LEN),
            ctx.sys.get_timestamp_millis(),
        );
        course.settings = settings;

        if let Some(key) = &self.idempotency_key {
            let key = format!("course:{}:{}", self.lecturer_id, key);
            let claimed = ctx
                .repos
                .key_values
                .set_if_absent(&key, &course.id.as_string())
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if let Some(existing_id) = claimed {
                let existing = match existing_id.parse::<ID>() {
                    Ok(id) => ctx.repos.courses.find(&id).await,
                    Err(_) => None,
                };
                return existing.ok_or(UseCaseError::IdempotencyKeyInUse(key));
            }
        }

        for _ in 0..JOIN_CODE_ATTEMPTS {
            match ctx.repos.courses.insert(&course).await {
                Ok(_) => return Ok(course),
                Err(e) => {
                    warn!("Unable to store course, retrying. Err: {:?}", e);
                    course.join_code = create_join_code(JOIN_CODE_LEN);
                }
            }
        }
        error!("Gave up storing course: {}", course.id);
        Err(UseCaseError::StorageError)
    }
}
