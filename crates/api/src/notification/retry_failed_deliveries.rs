use super::attempt_delivery::{attempt_delivery, AttemptResult};
use crate::shared::usecase::UseCase;
use futures::future;
use lecture_alerts_infra::{AttemptFilter, LectureContext};

/// Attempts again every failed `DeliveryRecord` whose backoff has elapsed
#[derive(Debug)]
pub struct RetryFailedDeliveriesUseCase {
    pub now: i64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RetryReport {
    pub retried: usize,
    pub delivered: usize,
    /// Failed again, with attempts left
    pub failed: usize,
    /// Failed again and given up on
    pub exhausted: usize,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for RetryFailedDeliveriesUseCase {
    type Response = RetryReport;

    type Error = UseCaseError;

    const NAME: &'static str = "RetryFailedDeliveries";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let due = ctx
            .repos
            .deliveries
            .find_due_retries(self.now, &ctx.config.delivery_retry_policy)
            .await;

        let results = future::join_all(due.iter().map(|record| {
            attempt_delivery(
                &record.job_id,
                &record.recipient_id,
                AttemptFilter::DueRetry,
                ctx,
            )
        }))
        .await;

        let mut report = RetryReport::default();
        for res in results {
            match res {
                AttemptResult::Skipped => continue,
                AttemptResult::Delivered => report.delivered += 1,
                AttemptResult::Failed => report.failed += 1,
                AttemptResult::Exhausted => report.exhausted += 1,
            }
            report.retried += 1;
        }
        Ok(report)
    }
}
