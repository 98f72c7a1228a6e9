mod inmemory;

pub use inmemory::InMemoryCourseRepo;
use lecture_alerts_domain::{Course, ID};

#[async_trait::async_trait]
pub trait ICourseRepo: Send + Sync {
    /// Fails if another `Course` already uses the same join code
    async fn insert(&self, course: &Course) -> anyhow::Result<()>;
    async fn find(&self, course_id: &ID) -> Option<Course>;
    async fn find_by_join_code(&self, join_code: &str) -> Option<Course>;
}
