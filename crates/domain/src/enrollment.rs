use crate::{notification::NotificationKind, shared::entity::ID};

/// Membership of a recipient in a `Course`. Unique per (course, recipient).
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub course_id: ID,
    pub recipient_id: ID,
    pub enrolled_at: i64,
    /// Recipients can mute reminders and announcements for a course. Schedule
    /// changes and cancellations are delivered regardless.
    pub notifications_enabled: bool,
}

impl Enrollment {
    pub fn new(course_id: ID, recipient_id: ID, enrolled_at: i64) -> Self {
        Self {
            course_id,
            recipient_id,
            enrolled_at,
            notifications_enabled: true,
        }
    }

    pub fn wants(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::ScheduleChange | NotificationKind::Cancellation => true,
            NotificationKind::Reminder | NotificationKind::AdHocAnnouncement => {
                self.notifications_enabled
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn muted_enrollment_still_wants_schedule_changes() {
        let mut enrollment = Enrollment::new(ID::new(), ID::new(), 0);
        assert!(enrollment.wants(NotificationKind::Reminder));

        enrollment.notifications_enabled = false;
        assert!(!enrollment.wants(NotificationKind::Reminder));
        assert!(!enrollment.wants(NotificationKind::AdHocAnnouncement));
        assert!(enrollment.wants(NotificationKind::ScheduleChange));
        assert!(enrollment.wants(NotificationKind::Cancellation));
    }
}
