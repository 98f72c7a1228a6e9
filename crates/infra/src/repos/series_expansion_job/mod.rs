mod inmemory;

pub use inmemory::InMemorySeriesExpansionJobRepo;
use lecture_alerts_domain::{SeriesExpansionJob, ID};

#[async_trait::async_trait]
pub trait ISeriesExpansionJobRepo: Send + Sync {
    async fn bulk_insert(&self, jobs: &[SeriesExpansionJob]) -> anyhow::Result<()>;
    async fn delete_by_series(&self, series_id: &ID) -> anyhow::Result<()>;
    async fn delete_all_before(&self, before: i64) -> Vec<SeriesExpansionJob>;
}

#[cfg(test)]
mod tests {
    use crate::LectureContext;
    use lecture_alerts_domain::{SeriesExpansionJob, ID};

    #[tokio::test]
    async fn crud() {
        let ctx = LectureContext::create_inmemory();
        let jobs = vec![
            SeriesExpansionJob {
                series_id: ID::new(),
                timestamp: 3,
            },
            SeriesExpansionJob {
                series_id: ID::new(),
                timestamp: 1,
            },
            SeriesExpansionJob {
                series_id: ID::new(),
                timestamp: 2,
            },
        ];
        assert!(ctx
            .repos
            .series_expansion_jobs
            .bulk_insert(&jobs)
            .await
            .is_ok());
        assert!(ctx
            .repos
            .series_expansion_jobs
            .delete_by_series(&jobs[2].series_id)
            .await
            .is_ok());

        // Delete before timestamp
        let delete_res = ctx.repos.series_expansion_jobs.delete_all_before(3).await;
        assert_eq!(delete_res, vec![jobs[1].clone(), jobs[0].clone()]);
        assert!(ctx
            .repos
            .series_expansion_jobs
            .delete_all_before(3)
            .await
            .is_empty());
    }
}
