mod inmemory;

pub use inmemory::InMemoryAttendanceRepo;
use lecture_alerts_domain::{AttendanceRecord, ID};

#[async_trait::async_trait]
pub trait IAttendanceRepo: Send + Sync {
    /// Creates a `NotMarked` record for each recipient that has none yet
    async fn ensure_records(&self, lecture_id: &ID, recipient_ids: &[ID]) -> anyhow::Result<()>;
    /// Marks the recipient present and returns the time of the first mark
    async fn mark_present(&self, lecture_id: &ID, recipient_id: &ID, at: i64)
        -> anyhow::Result<i64>;
    async fn find(&self, lecture_id: &ID, recipient_id: &ID) -> Option<AttendanceRecord>;
    async fn find_by_lecture(&self, lecture_id: &ID) -> Vec<AttendanceRecord>;
}
