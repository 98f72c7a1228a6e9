mod inmemory;

pub use inmemory::InMemoryNotificationJobRepo;
use lecture_alerts_domain::{NotificationJob, ID};

/// Time ordered queue of `NotificationJob`s waiting to fire.
///
/// Jobs are keyed by their id, so queueing a job whose id is already queued
/// replaces it instead of adding a second copy.
#[async_trait::async_trait]
pub trait INotificationJobRepo: Send + Sync {
    async fn insert(&self, jobs: &[NotificationJob]) -> anyhow::Result<()>;
    /// Removes every queued job of the lecture and queues `jobs` in its
    /// place, in one step. Returns the removed jobs, or `None` without
    /// touching the queue when jobs for a newer `revision` were already
    /// queued or the lecture was closed.
    async fn replace_for_lecture(
        &self,
        lecture_id: &ID,
        revision: i64,
        jobs: &[NotificationJob],
    ) -> anyhow::Result<Option<Vec<NotificationJob>>>;
    /// Removes every queued job of the lecture. Later calls to
    /// `replace_for_lecture` for the lecture are ignored.
    async fn close_lecture(&self, lecture_id: &ID) -> Vec<NotificationJob>;
    /// Removes and returns every job firing at or before `before`, in release
    /// order. A job is only ever returned once.
    async fn delete_all_before(&self, before: i64) -> Vec<NotificationJob>;
    async fn find_by_lecture(&self, lecture_id: &ID) -> Vec<NotificationJob>;
}

#[cfg(test)]
mod tests {
    use crate::LectureContext;
    use lecture_alerts_domain::{Lecture, LectureState, NotificationJob, NotificationKind, ID};

    const MINUTE: i64 = 1000 * 60;

    fn lecture(id: ID, start_ts: i64) -> Lecture {
        Lecture {
            id,
            course_id: Default::default(),
            lecturer_id: Default::default(),
            title: "Operating Systems".into(),
            description: None,
            location: None,
            start_ts,
            duration: 60 * MINUTE,
            state: LectureState::Scheduled,
            recurrence: None,
            series_id: None,
            materialized_until: None,
            schedule_revision: 0,
            version: 0,
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn releases_due_jobs_once_in_order() {
        let ctx = LectureContext::create_inmemory();
        let low: ID = "00000000-0000-0000-0000-000000000001".parse().unwrap();
        let high: ID = "ffffffff-0000-0000-0000-000000000000".parse().unwrap();
        let l_high = lecture(high, 100 * MINUTE);
        let l_low = lecture(low, 100 * MINUTE);

        let mut jobs = NotificationJob::reminders(&l_high, &[30 * MINUTE, 10 * MINUTE], 0);
        jobs.extend(NotificationJob::reminders(&l_low, &[30 * MINUTE], 0));
        jobs.push(NotificationJob::cancellation(&l_low, 70 * MINUTE));
        ctx.repos.notification_jobs.insert(&jobs).await.unwrap();
        // Queueing the same jobs again does not duplicate them
        ctx.repos.notification_jobs.insert(&jobs).await.unwrap();

        let due = ctx
            .repos
            .notification_jobs
            .delete_all_before(70 * MINUTE)
            .await;
        assert_eq!(
            due.iter()
                .map(|j| (j.lecture_id, j.kind))
                .collect::<Vec<_>>(),
            vec![
                (low, NotificationKind::Reminder),
                (low, NotificationKind::Cancellation),
                (high, NotificationKind::Reminder),
            ]
        );
        assert!(ctx
            .repos
            .notification_jobs
            .delete_all_before(70 * MINUTE)
            .await
            .is_empty());

        let rest = ctx
            .repos
            .notification_jobs
            .delete_all_before(1000 * MINUTE)
            .await;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].fire_at, 90 * MINUTE);
    }

    #[tokio::test]
    async fn replacing_touches_only_the_lectures_own_jobs() {
        let ctx = LectureContext::create_inmemory();
        let mut a = lecture(ID::new(), 100 * MINUTE);
        let b = lecture(ID::new(), 100 * MINUTE);
        let a_jobs = NotificationJob::reminders(&a, &[30 * MINUTE], 0);
        let b_jobs = NotificationJob::reminders(&b, &[30 * MINUTE], 0);
        ctx.repos.notification_jobs.insert(&a_jobs).await.unwrap();
        ctx.repos.notification_jobs.insert(&b_jobs).await.unwrap();

        a.start_ts = 200 * MINUTE;
        a.schedule_revision += 1;
        let new_jobs = NotificationJob::reminders(&a, &[30 * MINUTE], 0);
        let removed = ctx
            .repos
            .notification_jobs
            .replace_for_lecture(&a.id, a.schedule_revision, &new_jobs)
            .await
            .unwrap();
        assert_eq!(removed, Some(a_jobs.clone()));

        // Jobs of an older revision can no longer replace the newer ones
        let stale = ctx
            .repos
            .notification_jobs
            .replace_for_lecture(&a.id, 0, &a_jobs)
            .await
            .unwrap();
        assert!(stale.is_none());

        let queued = ctx.repos.notification_jobs.find_by_lecture(&a.id).await;
        assert_eq!(queued, new_jobs);
        assert_eq!(
            ctx.repos.notification_jobs.find_by_lecture(&b.id).await,
            b_jobs
        );

        let deleted = ctx.repos.notification_jobs.close_lecture(&b.id).await;
        assert_eq!(deleted, b_jobs);
        assert!(ctx
            .repos
            .notification_jobs
            .find_by_lecture(&b.id)
            .await
            .is_empty());

        // A closed lecture stays closed
        let res = ctx
            .repos
            .notification_jobs
            .replace_for_lecture(&b.id, 5, &b_jobs)
            .await
            .unwrap();
        assert!(res.is_none());
        let cancellation = NotificationJob::cancellation(&b, 0);
        ctx.repos
            .notification_jobs
            .insert(&[cancellation.clone()])
            .await
            .unwrap();
        assert_eq!(
            ctx.repos.notification_jobs.find_by_lecture(&b.id).await,
            vec![cancellation]
        );
    }
}
