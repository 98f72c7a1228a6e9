use actix_web::rt::time::sleep;
use lecture_alerts_sdk::{
    Course, CreateCourseInput, CreateLectureInput, Lecture, LectureAlertsSDK, ID,
};
use std::{future::Future, time::Duration};

pub const MINUTE: i64 = 1000 * 60;
pub const HOUR: i64 = 60 * MINUTE;

pub fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Polls `check` until it returns something, the background jobs run on
/// their own clock
pub async fn eventually<T, F, Fut>(mut check: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for _ in 0..100 {
        if let Some(res) = check().await {
            return res;
        }
        sleep(Duration::from_millis(50)).await;
    }
    panic!("Condition was not met in time");
}

pub async fn create_course(sdk: &LectureAlertsSDK) -> Course {
    sdk.course
        .create(CreateCourseInput {
            name: "Distributed systems".into(),
            lecturer_id: ID::new(),
            timezone: None,
            week_start: None,
            idempotency_key: None,
        })
        .await
        .expect("Expected to create course")
        .course
}

pub async fn create_lecture(sdk: &LectureAlertsSDK, course: &Course, start_ts: i64) -> Lecture {
    sdk.lecture
        .create(CreateLectureInput {
            course_id: course.id,
            lecturer_id: course.lecturer_id,
            title: "Consensus".into(),
            description: None,
            location: Some("Auditorium 1".into()),
            start_ts,
            duration: HOUR,
            recurrence: None,
            idempotency_key: None,
        })
        .await
        .expect("Expected to create lecture")
        .lecture
}
