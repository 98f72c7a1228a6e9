mod inmemory;

pub use inmemory::InMemoryEnrollmentRepo;
use lecture_alerts_domain::{Enrollment, ID};

#[async_trait::async_trait]
pub trait IEnrollmentRepo: Send + Sync {
    /// Inserts the `Enrollment` unless the recipient is already enrolled in
    /// the course. Returns the stored `Enrollment` in both cases.
    async fn insert_if_absent(&self, enrollment: &Enrollment) -> anyhow::Result<Enrollment>;
    async fn find(&self, course_id: &ID, recipient_id: &ID) -> Option<Enrollment>;
    async fn find_by_course(&self, course_id: &ID) -> Vec<Enrollment>;
    async fn delete(&self, course_id: &ID, recipient_id: &ID) -> Option<Enrollment>;
    async fn set_notifications_enabled(
        &self,
        course_id: &ID,
        recipient_id: &ID,
        enabled: bool,
    ) -> Option<Enrollment>;
}
