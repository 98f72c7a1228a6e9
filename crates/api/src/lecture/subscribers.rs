use super::{
    cancel_lecture::{CancelLectureUseCase, CancelledLecture},
    create_lecture::{CreateLectureUseCase, CreatedLecture},
    expand_series::ExpandSeriesUseCase,
    update_lecture::{UpdateLectureUseCase, UpdatedLecture},
};
use crate::notification::sync_lecture_notifications::{
    SyncLectureNotificationsTrigger, SyncLectureNotificationsUseCase,
};
use crate::shared::usecase::{execute, Subscriber};
use lecture_alerts_domain::Lecture;
use lecture_alerts_infra::LectureContext;

pub struct ScheduleNotificationsOnLectureCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateLectureUseCase> for ScheduleNotificationsOnLectureCreated {
    async fn notify(&self, e: &CreatedLecture, ctx: &LectureContext) {
        if !e.newly_created {
            return;
        }
        schedule_reminders(std::iter::once(&e.lecture).chain(&e.occurrences), ctx).await;
    }
}

pub struct ScheduleNotificationsOnSeriesExpanded;

#[async_trait::async_trait(?Send)]
impl Subscriber<ExpandSeriesUseCase> for ScheduleNotificationsOnSeriesExpanded {
    async fn notify(&self, e: &Vec<Lecture>, ctx: &LectureContext) {
        schedule_reminders(e.iter(), ctx).await;
    }
}

async fn schedule_reminders<'a>(lectures: impl Iterator<Item = &'a Lecture>, ctx: &LectureContext) {
    for lecture in lectures {
        let sync_notifications = SyncLectureNotificationsUseCase {
            request: SyncLectureNotificationsTrigger::LectureCreated(lecture),
        };

        // Sideeffect, ignore result
        let _ = execute(sync_notifications, ctx).await;
    }
}

pub struct SyncNotificationsOnLectureRescheduled;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateLectureUseCase> for SyncNotificationsOnLectureRescheduled {
    async fn notify(&self, e: &UpdatedLecture, ctx: &LectureContext) {
        if !e.rescheduled {
            return;
        }
        let sync_notifications = SyncLectureNotificationsUseCase {
            request: SyncLectureNotificationsTrigger::LectureRescheduled(&e.lecture),
        };

        // Sideeffect, ignore result
        let _ = execute(sync_notifications, ctx).await;
    }
}

pub struct SyncNotificationsOnLectureCancelled;

#[async_trait::async_trait(?Send)]
impl Subscriber<CancelLectureUseCase> for SyncNotificationsOnLectureCancelled {
    async fn notify(&self, e: &CancelledLecture, ctx: &LectureContext) {
        if !e.newly_cancelled {
            return;
        }
        let sync_notifications = SyncLectureNotificationsUseCase {
            request: SyncLectureNotificationsTrigger::LectureCancelled(&e.lecture),
        };

        // Sideeffect, ignore result
        let _ = execute(sync_notifications, ctx).await;
    }
}
