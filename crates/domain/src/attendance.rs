use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceStatus {
    NotMarked,
    Present,
}

/// Whether a recipient showed up to a `Lecture`.
///
/// Created as `NotMarked` when the recipient is first notified about the
/// lecture and changed at most once, to `Present`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub lecture_id: ID,
    pub recipient_id: ID,
    pub status: AttendanceStatus,
    pub marked_at: Option<i64>,
}

impl AttendanceRecord {
    pub fn new(lecture_id: ID, recipient_id: ID) -> Self {
        Self {
            lecture_id,
            recipient_id,
            status: AttendanceStatus::NotMarked,
            marked_at: None,
        }
    }

    /// Marks the recipient present at `at`. Returns the time the recipient
    /// was first marked present, so repeating the call is harmless.
    pub fn mark_present(&mut self, at: i64) -> i64 {
        match (self.status, self.marked_at) {
            (AttendanceStatus::Present, Some(marked_at)) => marked_at,
            _ => {
                self.status = AttendanceStatus::Present;
                self.marked_at = Some(at);
                at
            }
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub lecture_id: ID,
    pub present: usize,
    pub total: usize,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn marking_twice_keeps_first_timestamp() {
        let mut record = AttendanceRecord::new(ID::new(), ID::new());
        assert!(!record.is_present());
        assert_eq!(record.mark_present(10), 10);
        assert_eq!(record.mark_present(20), 10);
        assert_eq!(record.marked_at, Some(10));
        assert!(record.is_present());
    }
}
