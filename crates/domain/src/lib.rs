mod attendance;
mod course;
mod delivery;
mod enrollment;
mod lecture;
mod notification;
mod retry;
mod series;
mod shared;

pub use attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
pub use chrono_tz::Tz;
pub use course::{Course, CourseSettings};
pub use delivery::{DeliveryOutcome, DeliveryRecord, DeliveryStatus};
pub use enrollment::Enrollment;
pub use lecture::{Lecture, LectureError, LecturePatch, LectureState, LectureTransition};
pub use notification::{
    InvalidAnnouncementKeyError, JobId, JobQueueKey, NotificationJob, NotificationKind,
    NotificationPayload,
};
pub use retry::RetryPolicy;
pub use series::SeriesExpansionJob;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::{RRuleFrequency, RRuleOptions, WeekDay};
