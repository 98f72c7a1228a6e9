mod attendance;
mod base;
mod course;
mod lecture;
mod notification;
mod status;

use attendance::AttendanceClient;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use course::CourseClient;
pub use course::{CreateCourseInput, GetUpcomingLecturesInput};
use lecture::LectureClient;
pub use lecture::{CreateLectureInput, SendAnnouncementInput, UpdateLectureInput};
use notification::NotificationClient;
use status::StatusClient;
use std::sync::Arc;

pub use lecture_alerts_api_structs::dtos::*;
pub use lecture_alerts_domain::{
    AttendanceStatus, CourseSettings, DeliveryStatus, JobId, LectureState,
    NotificationKind, NotificationPayload, RRuleFrequency, RRuleOptions, Tz, WeekDay, ID,
};

// Domain
pub use lecture_alerts_api_structs::dtos::AttendanceRecordDTO as AttendanceRecord;
pub use lecture_alerts_api_structs::dtos::CourseDTO as Course;
pub use lecture_alerts_api_structs::dtos::DeliveryRecordDTO as DeliveryRecord;
pub use lecture_alerts_api_structs::dtos::EnrollmentDTO as Enrollment;
pub use lecture_alerts_api_structs::dtos::LectureDTO as Lecture;

/// Lecture Alerts Server SDK
///
/// The SDK contains methods for interacting with the Lecture Alerts server
/// API.
#[derive(Clone)]
pub struct LectureAlertsSDK {
    pub attendance: AttendanceClient,
    pub course: CourseClient,
    pub lecture: LectureClient,
    pub notification: NotificationClient,
    pub status: StatusClient,
}

impl LectureAlertsSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let attendance = AttendanceClient::new(base.clone());
        let course = CourseClient::new(base.clone());
        let lecture = LectureClient::new(base.clone());
        let notification = NotificationClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            attendance,
            course,
            lecture,
            notification,
            status,
        }
    }
}
