use actix_web::rt::time::timeout;
use lecture_alerts_domain::{DeliveryOutcome, DeliveryStatus, JobId, ID};
use lecture_alerts_infra::{AttemptFilter, LectureContext};
use std::time::Duration;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptResult {
    /// The record did not qualify, e.g. it was already delivered or another
    /// attempt is in flight
    Skipped,
    Delivered,
    /// Failed, will be retried later
    Failed,
    /// Failed and no attempts are left
    Exhausted,
}

/// Sends the notification of one `DeliveryRecord` and stores the outcome.
///
/// The record is marked in flight before the channel is awaited and no
/// lock is held while sending, so the channel may be slow without blocking
/// other deliveries. A send that takes longer than the configured delivery
/// timeout is abandoned and counted as a failed attempt.
pub async fn attempt_delivery(
    job_id: &JobId,
    recipient_id: &ID,
    filter: AttemptFilter,
    ctx: &LectureContext,
) -> AttemptResult {
    let policy = &ctx.config.delivery_retry_policy;
    let record = match ctx
        .repos
        .deliveries
        .begin_attempt(
            job_id,
            recipient_id,
            ctx.sys.get_timestamp_millis(),
            policy,
            filter,
        )
        .await
    {
        Some(record) => record,
        None => return AttemptResult::Skipped,
    };

    let send_timeout = Duration::from_millis(ctx.config.delivery_timeout_millis);
    let send = ctx
        .services
        .delivery_channel
        .send(recipient_id, &record.payload);
    let outcome = match timeout(send_timeout, send).await {
        Ok(outcome) => outcome,
        Err(_) => DeliveryOutcome::Failed(format!(
            "No answer from delivery channel within {} ms",
            ctx.config.delivery_timeout_millis
        )),
    };
    if let DeliveryOutcome::Failed(reason) = &outcome {
        warn!(
            job_id = %job_id,
            recipient_id = %recipient_id,
            attempt = record.attempts,
            "Delivery failed: {}",
            reason
        );
    }

    let record = match ctx
        .repos
        .deliveries
        .record_outcome(
            job_id,
            recipient_id,
            outcome,
            ctx.sys.get_timestamp_millis(),
            policy,
        )
        .await
    {
        Some(record) => record,
        None => {
            error!(
                "Delivery record of job: {} for recipient: {} disappeared during an attempt",
                job_id, recipient_id
            );
            return AttemptResult::Skipped;
        }
    };

    if record.is_exhausted(policy) {
        ctx.services.error_observer.delivery_exhausted(&record);
        AttemptResult::Exhausted
    } else if record.status == DeliveryStatus::Failed {
        AttemptResult::Failed
    } else {
        AttemptResult::Delivered
    }
}
