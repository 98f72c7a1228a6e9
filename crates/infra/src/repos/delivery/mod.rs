mod inmemory;

pub use inmemory::InMemoryDeliveryRepo;
use lecture_alerts_domain::{DeliveryOutcome, DeliveryRecord, JobId, RetryPolicy, ID};

/// Which records an attempt may be started on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptFilter {
    /// Any `Pending` or `Failed` record with attempts left
    Any,
    /// Only `Failed` records whose backoff has elapsed
    DueRetry,
}

#[async_trait::async_trait]
pub trait IDeliveryRepo: Send + Sync {
    /// Inserts the record unless there already is one for the same job and
    /// recipient. Returns the stored record in both cases.
    async fn insert_if_absent(&self, record: &DeliveryRecord) -> anyhow::Result<DeliveryRecord>;
    async fn find(&self, job_id: &JobId, recipient_id: &ID) -> Option<DeliveryRecord>;
    async fn find_by_job(&self, job_id: &JobId) -> Vec<DeliveryRecord>;
    async fn find_by_recipient(&self, recipient_id: &ID) -> Vec<DeliveryRecord>;
    /// Failed records ready to be tried again
    async fn find_due_retries(&self, now: i64, policy: &RetryPolicy) -> Vec<DeliveryRecord>;
    /// Marks the record in flight and counts the attempt. Returns `None` when
    /// the record does not qualify, e.g. because another attempt is already
    /// in flight.
    async fn begin_attempt(
        &self,
        job_id: &JobId,
        recipient_id: &ID,
        now: i64,
        policy: &RetryPolicy,
        filter: AttemptFilter,
    ) -> Option<DeliveryRecord>;
    async fn record_outcome(
        &self,
        job_id: &JobId,
        recipient_id: &ID,
        outcome: DeliveryOutcome,
        now: i64,
        policy: &RetryPolicy,
    ) -> Option<DeliveryRecord>;
    /// Returns the record as it is after the call, acknowledged or not
    async fn acknowledge(&self, job_id: &JobId, recipient_id: &ID, now: i64)
        -> Option<DeliveryRecord>;
}
