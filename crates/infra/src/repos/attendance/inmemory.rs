use super::IAttendanceRepo;
use dashmap::DashMap;
use lecture_alerts_domain::{AttendanceRecord, ID};

pub struct InMemoryAttendanceRepo {
    records: DashMap<(ID, ID), AttendanceRecord>,
}

impl InMemoryAttendanceRepo {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

#[async_trait::async_trait]
impl IAttendanceRepo for InMemoryAttendanceRepo {
    async fn ensure_records(&self, lecture_id: &ID, recipient_ids: &[ID]) -> anyhow::Result<()> {
        for recipient_id in recipient_ids {
            self.records
                .entry((*lecture_id, *recipient_id))
                .or_insert_with(|| AttendanceRecord::new(*lecture_id, *recipient_id));
        }
        Ok(())
    }

    async fn mark_present(
        &self,
        lecture_id: &ID,
        recipient_id: &ID,
        at: i64,
    ) -> anyhow::Result<i64> {
        let mut record = self
            .records
            .entry((*lecture_id, *recipient_id))
            .or_insert_with(|| AttendanceRecord::new(*lecture_id, *recipient_id));
        Ok(record.mark_present(at))
    }

    async fn find(&self, lecture_id: &ID, recipient_id: &ID) -> Option<AttendanceRecord> {
        self.records
            .get(&(*lecture_id, *recipient_id))
            .map(|r| r.value().clone())
    }

    async fn find_by_lecture(&self, lecture_id: &ID) -> Vec<AttendanceRecord> {
        let mut records = self
            .records
            .iter()
            .filter(|r| r.lecture_id == *lecture_id)
            .map(|r| r.value().clone())
            .collect::<Vec<_>>();
        records.sort_by_key(|r| r.recipient_id);
        records
    }
}
