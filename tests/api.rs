mod helpers;

use helpers::setup::spawn_app;
use helpers::utils::*;
use lecture_alerts_sdk::{
    APIErrorVariant, AttendanceStatus, CreateCourseInput, DeliveryStatus,
    GetUpcomingLecturesInput, LectureState, NotificationKind, SendAnnouncementInput,
    UpdateLectureInput, ID,
};

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_create_course_is_idempotent() {
    let (_, sdk, _) = spawn_app().await;
    let input = || CreateCourseInput {
        name: "Compilers".into(),
        lecturer_id: ID::default(),
        timezone: None,
        week_start: Some(1),
        idempotency_key: Some("spring".into()),
    };
    let first = sdk.course.create(input()).await.unwrap().course;
    let second = sdk.course.create(input()).await.unwrap().course;
    assert_eq!(first.id, second.id);

    let found = sdk.course.get(first.id).await.unwrap().course;
    assert_eq!(found.join_code, first.join_code);

    let res = sdk
        .course
        .create(CreateCourseInput {
            name: "   ".into(),
            idempotency_key: None,
            ..input()
        })
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);
}

#[actix_web::main]
#[test]
async fn test_enrollment_flow() {
    let (_, sdk, _) = spawn_app().await;
    let course = create_course(&sdk).await;
    let student = ID::new();

    let enrollment = sdk
        .course
        .join(course.join_code.clone(), student)
        .await
        .unwrap()
        .enrollment;
    assert_eq!(enrollment.course_id, course.id);
    assert!(enrollment.notifications_enabled);

    let res = sdk.course.join("nope".into(), student).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);

    let enrollment = sdk
        .course
        .set_notifications_enabled(course.id, student, false)
        .await
        .unwrap()
        .enrollment;
    assert!(!enrollment.notifications_enabled);

    let removed = sdk.course.unenroll(course.id, student).await.unwrap();
    assert!(removed.enrollment.is_some());
    let removed = sdk.course.unenroll(course.id, student).await.unwrap();
    assert!(removed.enrollment.is_none());

    let res = sdk
        .course
        .set_notifications_enabled(course.id, student, true)
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Forbidden);

    let res = sdk.course.enroll(ID::new(), student).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);
}

#[actix_web::main]
#[test]
async fn test_lecture_lifecycle() {
    let (_, sdk, _) = spawn_app().await;
    let course = create_course(&sdk).await;
    let start_ts = now() + 2 * HOUR;
    let lecture = create_lecture(&sdk, &course, start_ts).await;
    assert_eq!(lecture.state, LectureState::Scheduled);
    assert_eq!(lecture.end_ts, start_ts + HOUR);

    let updated = sdk
        .lecture
        .update(UpdateLectureInput {
            lecture_id: lecture.id,
            title: Some("Raft".into()),
            description: None,
            location: None,
            start_ts: Some(start_ts + HOUR),
            duration: None,
        })
        .await
        .unwrap()
        .lecture;
    assert_eq!(updated.title, "Raft");
    assert_eq!(updated.start_ts, start_ts + HOUR);
    assert_eq!(updated.schedule_revision, lecture.schedule_revision + 1);

    let upcoming = sdk
        .course
        .upcoming_lectures(GetUpcomingLecturesInput {
            course_id: course.id,
            start_ts: now(),
            end_ts: now() + 24 * HOUR,
        })
        .await
        .unwrap();
    assert_eq!(upcoming.lectures.len(), 1);

    let cancelled = sdk.lecture.cancel(lecture.id).await.unwrap().lecture;
    assert_eq!(cancelled.state, LectureState::Cancelled);
    // Cancelling twice is fine
    assert!(sdk.lecture.cancel(lecture.id).await.is_ok());

    let res = sdk
        .lecture
        .update(UpdateLectureInput {
            lecture_id: lecture.id,
            title: Some("Paxos".into()),
            description: None,
            location: None,
            start_ts: None,
            duration: None,
        })
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Conflict);

    let upcoming = sdk
        .course
        .upcoming_lectures(GetUpcomingLecturesInput {
            course_id: course.id,
            start_ts: now(),
            end_ts: now() + 24 * HOUR,
        })
        .await
        .unwrap();
    assert!(upcoming.lectures.is_empty());

    let res = sdk.lecture.get(ID::new()).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);
}

#[actix_web::main]
#[test]
async fn test_announcement_is_delivered_once_and_acknowledged() {
    let (_, sdk, _) = spawn_app().await;
    let course = create_course(&sdk).await;
    let student = ID::new();
    sdk.course.enroll(course.id, student).await.unwrap();
    let lecture = create_lecture(&sdk, &course, now() + 2 * HOUR).await;

    let announce = || SendAnnouncementInput {
        lecture_id: lecture.id,
        message: "Bring your laptop".into(),
        idempotency_key: "laptops".into(),
    };
    let job = sdk.lecture.announce(announce()).await.unwrap();
    let again = sdk.lecture.announce(announce()).await.unwrap();
    assert_eq!(job.job_id, again.job_id);

    let (client, job_id) = (&sdk, &job.job_id);
    let deliveries = eventually(|| async move {
        let deliveries = client
            .notification
            .deliveries(job_id)
            .await
            .unwrap()
            .deliveries;
        match deliveries.first() {
            Some(d) if d.status == DeliveryStatus::Delivered => Some(deliveries),
            _ => None,
        }
    })
    .await;
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].recipient_id, student);
    assert_eq!(deliveries[0].attempts, 1);
    assert_eq!(
        deliveries[0].notification.kind,
        NotificationKind::AdHocAnnouncement
    );

    let inbox = sdk.notification.for_recipient(student).await.unwrap();
    assert!(inbox.deliveries.iter().any(|d| d.job_id == job.job_id));

    let acked = sdk
        .notification
        .acknowledge(&job.job_id, student)
        .await
        .unwrap()
        .delivery
        .unwrap();
    assert_eq!(acked.status, DeliveryStatus::Acknowledged);
    assert!(acked.acknowledged_at.is_some());

    let res = sdk
        .lecture
        .announce(SendAnnouncementInput {
            idempotency_key: "not valid".into(),
            ..announce()
        })
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);
}

#[actix_web::main]
#[test]
async fn test_attendance_while_lecture_runs() {
    let (_, sdk, _) = spawn_app().await;
    let course = create_course(&sdk).await;
    let student = ID::new();
    let absent = ID::new();
    sdk.course.enroll(course.id, student).await.unwrap();
    sdk.course.enroll(course.id, absent).await.unwrap();

    let early = create_lecture(&sdk, &course, now() + 2 * HOUR).await;
    let res = sdk.attendance.mark(early.id, student).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Conflict);

    let lecture = create_lecture(&sdk, &course, now() + 200).await;
    let (client, lecture_id) = (&sdk, lecture.id);
    eventually(|| async move {
        let lecture = client.lecture.get(lecture_id).await.unwrap().lecture;
        (lecture.state == LectureState::InProgress).then(|| ())
    })
    .await;

    let res = sdk.attendance.mark(lecture.id, ID::new()).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Forbidden);

    let first = sdk.attendance.mark(lecture.id, student).await.unwrap();
    let second = sdk.attendance.mark(lecture.id, student).await.unwrap();
    assert_eq!(first.marked_at, second.marked_at);

    let summary = sdk.attendance.summary(lecture.id).await.unwrap();
    assert_eq!(summary.present, 1);
    assert_eq!(summary.total, 2);
    let absent_record = summary
        .records
        .iter()
        .find(|r| r.recipient_id == absent)
        .unwrap();
    assert_eq!(absent_record.status, AttendanceStatus::NotMarked);
}
