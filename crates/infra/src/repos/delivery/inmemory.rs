use super::{AttemptFilter, IDeliveryRepo};
use dashmap::DashMap;
use lecture_alerts_domain::{DeliveryOutcome, DeliveryRecord, JobId, RetryPolicy, ID};

/// One entry per (job, recipient), each behind its own shard lock
pub struct InMemoryDeliveryRepo {
    records: DashMap<(JobId, ID), DeliveryRecord>,
}

impl InMemoryDeliveryRepo {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    fn find_by<F: Fn(&DeliveryRecord) -> bool>(&self, compare: F) -> Vec<DeliveryRecord> {
        let mut records = self
            .records
            .iter()
            .filter(|r| compare(r.value()))
            .map(|r| r.value().clone())
            .collect::<Vec<_>>();
        records.sort_by(|r1, r2| {
            r1.created
                .cmp(&r2.created)
                .then_with(|| r1.job_id.cmp(&r2.job_id))
                .then_with(|| r1.recipient_id.cmp(&r2.recipient_id))
        });
        records
    }
}

#[async_trait::async_trait]
impl IDeliveryRepo for InMemoryDeliveryRepo {
    async fn insert_if_absent(&self, record: &DeliveryRecord) -> anyhow::Result<DeliveryRecord> {
        let stored = self
            .records
            .entry((record.job_id.clone(), record.recipient_id))
            .or_insert_with(|| record.clone());
        Ok(stored.value().clone())
    }

    async fn find(&self, job_id: &JobId, recipient_id: &ID) -> Option<DeliveryRecord> {
        self.records
            .get(&(job_id.clone(), *recipient_id))
            .map(|r| r.value().clone())
    }

    async fn find_by_job(&self, job_id: &JobId) -> Vec<DeliveryRecord> {
        self.find_by(|r| r.job_id == *job_id)
    }

    async fn find_by_recipient(&self, recipient_id: &ID) -> Vec<DeliveryRecord> {
        self.find_by(|r| r.recipient_id == *recipient_id)
    }

    async fn find_due_retries(&self, now: i64, policy: &RetryPolicy) -> Vec<DeliveryRecord> {
        self.find_by(|r| r.is_due_for_retry(now, policy))
    }

    async fn begin_attempt(
        &self,
        job_id: &JobId,
        recipient_id: &ID,
        now: i64,
        policy: &RetryPolicy,
        filter: AttemptFilter,
    ) -> Option<DeliveryRecord> {
        let mut record = self.records.get_mut(&(job_id.clone(), *recipient_id))?;
        let allowed = match filter {
            AttemptFilter::Any => record.can_attempt(policy),
            AttemptFilter::DueRetry => record.is_due_for_retry(now, policy),
        };
        if !allowed {
            return None;
        }
        record.begin_attempt(now);
        Some(record.clone())
    }

    async fn record_outcome(
        &self,
        job_id: &JobId,
        recipient_id: &ID,
        outcome: DeliveryOutcome,
        now: i64,
        policy: &RetryPolicy,
    ) -> Option<DeliveryRecord> {
        let mut record = self.records.get_mut(&(job_id.clone(), *recipient_id))?;
        record.record_outcome(outcome, now, policy);
        Some(record.clone())
    }

    async fn acknowledge(
        &self,
        job_id: &JobId,
        recipient_id: &ID,
        now: i64,
    ) -> Option<DeliveryRecord> {
        let mut record = self.records.get_mut(&(job_id.clone(), *recipient_id))?;
        record.acknowledge(now);
        Some(record.clone())
    }
}
