use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::get_upcoming_lectures::{APIResponse, PathParams, QueryParams};
use lecture_alerts_domain::{Lecture, LectureState, ID};
use lecture_alerts_infra::LectureContext;

pub async fn get_upcoming_lectures_controller(
    query_params: web::Query<QueryParams>,
    params: web::Path<PathParams>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetUpcomingLecturesUseCase {
        course_id: params.course_id,
        start_ts: query_params.start_ts,
        end_ts: query_params.end_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|lectures| HttpResponse::Ok().json(APIResponse::new(lectures)))
        .map_err(|e| match e {
            UseCaseError::InvalidTimespan => {
                ApiError::BadClientData("The start and end timespan is invalid".into())
            }
            UseCaseError::NotFound => ApiError::NotFound(format!(
                "The course with id: {}, was not found.",
                params.course_id
            )),
        })
}

/// Lectures of a course starting within `[start_ts, end_ts]` that have not
/// been cancelled, ordered by start
#[derive(Debug)]
pub struct GetUpcomingLecturesUseCase {
    pub course_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    InvalidTimespan,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingLecturesUseCase {
    type Response = Vec<Lecture>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingLectures";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        match self.end_ts.checked_sub(self.start_ts) {
            Some(span) if (0..=ctx.config.upcoming_query_duration_limit).contains(&span) => (),
            _ => return Err(UseCaseError::InvalidTimespan),
        }
        if ctx.repos.courses.find(&self.course_id).await.is_none() {
            return Err(UseCaseError::NotFound);
        }

        Ok(ctx
            .repos
            .lectures
            .find_by_course(&self.course_id, self.start_ts, self.end_ts)
            .await
            .into_iter()
            .filter(|l| l.state != LectureState::Cancelled)
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lecture::cancel_lecture::CancelLectureUseCase;
    use crate::shared::test_helpers::*;

    #[actix_web::test]
    async fn lists_lectures_in_window_without_cancelled() {
        let TestContext { ctx, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let late = create_lecture(&ctx, &course, START + 3 * HOUR).await;
        let early = create_lecture(&ctx, &course, START + HOUR).await;
        let cancelled = create_lecture(&ctx, &course, START + 2 * HOUR).await;
        create_lecture(&ctx, &course, START + 10 * HOUR).await;
        execute(
            CancelLectureUseCase {
                lecture_id: cancelled.id,
            },
            &ctx,
        )
        .await
        .unwrap();

        let lectures = execute(
            GetUpcomingLecturesUseCase {
                course_id: course.id,
                start_ts: START,
                end_ts: START + 5 * HOUR,
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(
            lectures.iter().map(|l| l.id).collect::<Vec<_>>(),
            vec![early.id, late.id]
        );
    }

    #[actix_web::test]
    async fn rejects_invalid_timespans() {
        let TestContext { ctx, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let limit = ctx.config.upcoming_query_duration_limit;

        for (start_ts, end_ts) in [
            (START, START - 1),
            (START, START + limit + 1),
            (i64::MIN, 0),
            (-1, i64::MAX),
        ] {
            let res = execute(
                GetUpcomingLecturesUseCase {
                    course_id: course.id,
                    start_ts,
                    end_ts,
                },
                &ctx,
            )
            .await;
            assert_eq!(res.unwrap_err(), UseCaseError::InvalidTimespan);
        }

        let res = execute(
            GetUpcomingLecturesUseCase {
                course_id: ID::new(),
                start_ts: START,
                end_ts: START + HOUR,
            },
            &ctx,
        )
        .await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound);
    }
}
