use super::ISeriesExpansionJobRepo;
use lecture_alerts_domain::{SeriesExpansionJob, ID};
use parking_lot::Mutex;

pub struct InMemorySeriesExpansionJobRepo {
    jobs: Mutex<Vec<SeriesExpansionJob>>,
}

impl InMemorySeriesExpansionJobRepo {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISeriesExpansionJobRepo for InMemorySeriesExpansionJobRepo {
    async fn bulk_insert(&self, jobs: &[SeriesExpansionJob]) -> anyhow::Result<()> {
        let mut stored = self.jobs.lock();
        stored.extend_from_slice(jobs);
        stored.sort_by_key(|job| job.timestamp);
        Ok(())
    }

    async fn delete_by_series(&self, series_id: &ID) -> anyhow::Result<()> {
        self.jobs.lock().retain(|job| job.series_id != *series_id);
        Ok(())
    }

    async fn delete_all_before(&self, before: i64) -> Vec<SeriesExpansionJob> {
        let mut stored = self.jobs.lock();
        let due = stored.iter().take_while(|job| job.timestamp <= before).count();
        stored.drain(..due).collect()
    }
}
