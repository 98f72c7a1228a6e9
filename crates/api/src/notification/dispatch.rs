use super::attempt_delivery::{attempt_delivery, AttemptResult};
use crate::shared::usecase::UseCase;
use futures::future;
use lecture_alerts_domain::{DeliveryRecord, JobId, NotificationJob, ID};
use lecture_alerts_infra::{AttemptFilter, LectureContext};
use tracing::{error, info, warn};

/// Delivers a released `NotificationJob` to everyone enrolled in its course
/// at the time of dispatch.
///
/// Dispatching the same job again reuses the `DeliveryRecord`s of the first
/// dispatch, so a recipient is never notified twice about the same job.
#[derive(Debug)]
pub struct DispatchNotificationUseCase {
    pub job: NotificationJob,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchReport {
    pub job_id: JobId,
    /// Recipients the job is delivered to
    pub resolved: usize,
    /// Enrolled recipients that muted this kind of notification
    pub skipped: usize,
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DispatchNotificationUseCase {
    type Response = DispatchReport;

    type Error = UseCaseError;

    const NAME: &'static str = "DispatchNotification";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let job = &self.job;
        let now = ctx.sys.get_timestamp_millis();

        let enrollments = ctx.repos.enrollments.find_by_course(&job.course_id).await;
        let enrolled = enrollments
            .iter()
            .map(|e| e.recipient_id)
            .collect::<Vec<_>>();
        ctx.repos
            .attendance
            .ensure_records(&job.lecture_id, &enrolled)
            .await
            .map_err(|e| {
                error!(
                    "Unable to create attendance records for lecture: {}. Err: {:?}",
                    job.lecture_id, e
                );
                UseCaseError::StorageError
            })?;

        let recipients = enrollments
            .iter()
            .filter(|e| e.wants(job.kind))
            .map(|e| e.recipient_id)
            .collect::<Vec<ID>>();
        if recipients.is_empty() {
            warn!(
                "Notification: {} for lecture: {} has no recipients",
                job.id, job.lecture_id
            );
        }

        for recipient_id in &recipients {
            ctx.repos
                .deliveries
                .insert_if_absent(&DeliveryRecord::new(job, *recipient_id, now))
                .await
                .map_err(|e| {
                    error!("Unable to store delivery record. Err: {:?}", e);
                    UseCaseError::StorageError
                })?;
        }

        let results = future::join_all(recipients.iter().map(|recipient_id| {
            attempt_delivery(&job.id, recipient_id, AttemptFilter::Any, ctx)
        }))
        .await;

        let count =
            |wanted: &[AttemptResult]| results.iter().filter(|r| wanted.contains(r)).count();
        let report = DispatchReport {
            job_id: job.id.clone(),
            resolved: recipients.len(),
            skipped: enrollments.len() - recipients.len(),
            attempted: count(&[
                AttemptResult::Delivered,
                AttemptResult::Failed,
                AttemptResult::Exhausted,
            ]),
            delivered: count(&[AttemptResult::Delivered]),
            failed: count(&[AttemptResult::Failed, AttemptResult::Exhausted]),
        };
        info!(
            job_id = %report.job_id,
            kind = %job.kind,
            "Dispatched notification to {} of {} recipients, {} failed",
            report.delivered,
            report.resolved,
            report.failed
        );
        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::{test_helpers::*, usecase::execute};
    use lecture_alerts_domain::{AttendanceStatus, DeliveryStatus, NotificationKind};

    #[actix_web::test]
    async fn delivers_to_every_enrolled_recipient() {
        let TestContext { ctx, channel, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let r1 = enroll(&ctx, &course.id).await;
        let r2 = enroll(&ctx, &course.id).await;
        let lecture = create_lecture(&ctx, &course, START + 2 * HOUR).await;
        let job = ctx.repos.notification_jobs.find_by_lecture(&lecture.id).await[0].clone();

        let report = execute(DispatchNotificationUseCase { job: job.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report.resolved, 2);
        assert_eq!(report.attempted, 2);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 0);

        for recipient_id in [r1, r2] {
            let sent = channel.sent_to(&recipient_id);
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].payload.kind, NotificationKind::Reminder);

            let record = ctx.repos.deliveries.find(&job.id, &recipient_id).await.unwrap();
            assert_eq!(record.status, DeliveryStatus::Delivered);
            assert_eq!(record.attempts, 1);

            let attendance = ctx
                .repos
                .attendance
                .find(&lecture.id, &recipient_id)
                .await
                .unwrap();
            assert_eq!(attendance.status, AttendanceStatus::NotMarked);
        }
    }

    #[actix_web::test]
    async fn dispatching_twice_delivers_once() {
        let TestContext { ctx, channel, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let recipient_id = enroll(&ctx, &course.id).await;
        let lecture = create_lecture(&ctx, &course, START + 2 * HOUR).await;
        let job = ctx.repos.notification_jobs.find_by_lecture(&lecture.id).await[0].clone();

        execute(DispatchNotificationUseCase { job: job.clone() }, &ctx)
            .await
            .unwrap();
        let report = execute(DispatchNotificationUseCase { job: job.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report.resolved, 1);
        assert_eq!(report.attempted, 0);

        assert_eq!(channel.sent_to(&recipient_id).len(), 1);
        assert_eq!(ctx.repos.deliveries.find_by_job(&job.id).await.len(), 1);
    }

    #[actix_web::test]
    async fn muted_recipients_only_get_schedule_changes() {
        let TestContext { ctx, channel, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let muted = enroll(&ctx, &course.id).await;
        mute(&ctx, &course.id, &muted).await;
        let lecture = create_lecture(&ctx, &course, START + 2 * HOUR).await;

        let reminder = ctx.repos.notification_jobs.find_by_lecture(&lecture.id).await[0].clone();
        let report = execute(DispatchNotificationUseCase { job: reminder }, &ctx)
            .await
            .unwrap();
        assert_eq!(report.resolved, 0);
        assert_eq!(report.skipped, 1);
        assert!(channel.sent_to(&muted).is_empty());

        let cancellation = NotificationJob::cancellation(&lecture, START);
        let report = execute(DispatchNotificationUseCase { job: cancellation }, &ctx)
            .await
            .unwrap();
        assert_eq!(report.delivered, 1);
        assert_eq!(channel.sent_to(&muted).len(), 1);
    }

    #[actix_web::test]
    async fn one_failing_recipient_does_not_block_others() {
        let TestContext { ctx, channel, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let failing = enroll(&ctx, &course.id).await;
        let healthy = enroll(&ctx, &course.id).await;
        channel.fail_next(failing, 1);
        let lecture = create_lecture(&ctx, &course, START + 2 * HOUR).await;
        let job = ctx.repos.notification_jobs.find_by_lecture(&lecture.id).await[0].clone();

        let report = execute(DispatchNotificationUseCase { job: job.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 1);

        let failed = ctx.repos.deliveries.find(&job.id, &failing).await.unwrap();
        assert_eq!(failed.status, DeliveryStatus::Failed);
        assert_eq!(
            failed.next_attempt_at,
            Some(START + ctx.config.delivery_retry_policy.initial_backoff)
        );
        let delivered = ctx.repos.deliveries.find(&job.id, &healthy).await.unwrap();
        assert_eq!(delivered.status, DeliveryStatus::Delivered);
    }

    #[actix_web::test]
    async fn dispatch_without_recipients_is_reported() {
        let TestContext { ctx, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let lecture = create_lecture(&ctx, &course, START + 2 * HOUR).await;
        let job = NotificationJob::cancellation(&lecture, START);

        let report = execute(DispatchNotificationUseCase { job }, &ctx)
            .await
            .unwrap();
        assert_eq!(report.resolved, 0);
        assert_eq!(report.attempted, 0);
    }
}
