mod inmemory;

pub use inmemory::InMemoryLectureRepo;
use lecture_alerts_domain::{Lecture, ID};

#[async_trait::async_trait]
pub trait ILectureRepo: Send + Sync {
    async fn insert(&self, lecture: &Lecture) -> anyhow::Result<()>;
    /// Stores `lecture` only if the stored version still equals
    /// `lecture.version`. Returns the saved lecture with its new version, or
    /// `None` when someone else saved the lecture in between.
    async fn compare_and_save(&self, lecture: &Lecture) -> anyhow::Result<Option<Lecture>>;
    async fn find(&self, lecture_id: &ID) -> Option<Lecture>;
    /// Lectures of the course starting in `[start_ts, end_ts]`, ordered by start
    async fn find_by_course(&self, course_id: &ID, start_ts: i64, end_ts: i64) -> Vec<Lecture>;
    /// Lectures that are `Scheduled` or `InProgress`
    async fn find_unfinished(&self) -> Vec<Lecture>;
    /// Occurrences materialized from the given series
    async fn find_by_series(&self, series_id: &ID) -> Vec<Lecture>;
}
