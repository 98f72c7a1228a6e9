use crate::shared::usecase::UseCase;
use lecture_alerts_domain::{Lecture, NotificationJob};
use lecture_alerts_infra::LectureContext;
use tracing::{error, info};

/// Keeps the queued `NotificationJob`s of a `Lecture` in line with its
/// schedule
#[derive(Debug)]
pub struct SyncLectureNotificationsUseCase<'a> {
    pub request: SyncLectureNotificationsTrigger<'a>,
}

#[derive(Debug)]
pub enum SyncLectureNotificationsTrigger<'a> {
    LectureCreated(&'a Lecture),
    /// The start or duration changed
    LectureRescheduled(&'a Lecture),
    LectureCancelled(&'a Lecture),
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for SyncLectureNotificationsUseCase<'a> {
    type Response = Vec<NotificationJob>;

    type Error = UseCaseError;

    const NAME: &'static str = "SyncLectureNotifications";

    /// Returns the jobs that were queued
    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let offsets = &ctx.config.reminder_offsets;

        match self.request {
            SyncLectureNotificationsTrigger::LectureCreated(lecture) => {
                let jobs = NotificationJob::reminders(lecture, offsets, now);
                replace_jobs(lecture, jobs, ctx).await
            }
            SyncLectureNotificationsTrigger::LectureRescheduled(lecture) => {
                let mut jobs = NotificationJob::reminders(lecture, offsets, now);
                jobs.push(NotificationJob::schedule_change(lecture, now));
                replace_jobs(lecture, jobs, ctx).await
            }
            SyncLectureNotificationsTrigger::LectureCancelled(lecture) => {
                let purged = ctx.repos.notification_jobs.close_lecture(&lecture.id).await;
                info!(
                    "Purged {} pending notifications of cancelled lecture: {}",
                    purged.len(),
                    lecture.id
                );
                if lecture.is_series_root() {
                    ctx.repos
                        .series_expansion_jobs
                        .delete_by_series(&lecture.id)
                        .await
                        .map_err(|e| {
                            error!(
                                "Unable to stop expanding series: {}. Err: {:?}",
                                lecture.id, e
                            );
                            UseCaseError::StorageError
                        })?;
                }

                let job = NotificationJob::cancellation(lecture, now);
                ctx.repos
                    .notification_jobs
                    .insert(&[job.clone()])
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                Ok(vec![job])
            }
        }
    }
}

async fn replace_jobs(
    lecture: &Lecture,
    jobs: Vec<NotificationJob>,
    ctx: &LectureContext,
) -> Result<Vec<NotificationJob>, UseCaseError> {
    let replaced = ctx
        .repos
        .notification_jobs
        .replace_for_lecture(&lecture.id, lecture.schedule_revision, &jobs)
        .await
        .map_err(|e| {
            error!(
                "Unable to queue notifications for lecture: {}. Err: {:?}",
                lecture.id, e
            );
            UseCaseError::StorageError
        })?;

    match replaced {
        Some(_) => Ok(jobs),
        None => {
            info!(
                "Notifications for lecture: {} were already synced to a newer schedule",
                lecture.id
            );
            Ok(Vec::new())
        }
    }
}
