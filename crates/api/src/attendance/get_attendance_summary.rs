use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::get_attendance_summary::*;
use lecture_alerts_domain::{AttendanceRecord, AttendanceSummary, ID};
use lecture_alerts_infra::LectureContext;
use std::collections::BTreeMap;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::NotFound(lecture_id) => ApiError::NotFound(format!(
            "The lecture with id: {}, was not found.",
            lecture_id
        )),
    }
}

pub async fn get_attendance_summary_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetAttendanceSummaryUseCase {
        lecture_id: path_params.lecture_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.summary, res.records)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetAttendanceSummaryUseCase {
    pub lecture_id: ID,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub summary: AttendanceSummary,
    /// One record per recipient counted in the total, ordered by recipient
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAttendanceSummaryUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAttendanceSummary";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let lecture = ctx
            .repos
            .lectures
            .find(&self.lecture_id)
            .await
            .ok_or(UseCaseError::NotFound(self.lecture_id))?;

        // Recipients that enrolled after the last notification have no record
        // yet but are still expected to attend
        let mut records = ctx
            .repos
            .attendance
            .find_by_lecture(&lecture.id)
            .await
            .into_iter()
            .map(|r| (r.recipient_id, r))
            .collect::<BTreeMap<_, _>>();
        for enrollment in ctx.repos.enrollments.find_by_course(&lecture.course_id).await {
            records
                .entry(enrollment.recipient_id)
                .or_insert_with(|| AttendanceRecord::new(lecture.id, enrollment.recipient_id));
        }

        let records = records.into_values().collect::<Vec<_>>();
        let summary = AttendanceSummary {
            lecture_id: lecture.id,
            present: records.iter().filter(|r| r.is_present()).count(),
            total: records.len(),
        };
        Ok(UseCaseResponse { summary, records })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::attendance::mark_attendance::MarkAttendanceUseCase;
    use crate::lecture::advance_clock::AdvanceClockUseCase;
    use crate::shared::test_helpers::*;

    #[actix_web::test]
    async fn counts_present_out_of_expected_recipients() {
        let TestContext { ctx, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let present = enroll(&ctx, &course.id).await;
        enroll(&ctx, &course.id).await;
        let lecture = create_lecture(&ctx, &course, START + HOUR).await;
        execute(AdvanceClockUseCase { now: START + HOUR }, &ctx)
            .await
            .unwrap();
        execute(
            MarkAttendanceUseCase {
                lecture_id: lecture.id,
                recipient_id: present,
                at: START + HOUR,
            },
            &ctx,
        )
        .await
        .unwrap();

        let res = execute(
            GetAttendanceSummaryUseCase {
                lecture_id: lecture.id,
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(
            res.summary,
            AttendanceSummary {
                lecture_id: lecture.id,
                present: 1,
                total: 2,
            }
        );
        assert_eq!(res.records.len(), 2);

        let unknown = execute(
            GetAttendanceSummaryUseCase {
                lecture_id: ID::new(),
            },
            &ctx,
        )
        .await;
        assert!(matches!(unknown, Err(UseCaseError::NotFound(_))));
    }
}
