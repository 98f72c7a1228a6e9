use crate::shared::usecase::UseCase;
use lecture_alerts_domain::NotificationJob;
use lecture_alerts_infra::LectureContext;

/// Takes every `NotificationJob` due at `now` off the queue, in release
/// order. A released job is owned by the caller and never released again.
#[derive(Debug)]
pub struct PollDueNotificationsUseCase {
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for PollDueNotificationsUseCase {
    type Response = Vec<NotificationJob>;

    type Error = UseCaseError;

    const NAME: &'static str = "PollDueNotifications";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx
            .repos
            .notification_jobs
            .delete_all_before(self.now)
            .await)
    }
}
