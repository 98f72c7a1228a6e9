use lecture_alerts_domain::{Course, CourseSettings, Enrollment, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CourseDTO {
    pub id: ID,
    pub name: String,
    pub lecturer_id: ID,
    pub join_code: String,
    pub settings: CourseSettings,
    pub created: i64,
}

impl CourseDTO {
    pub fn new(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            lecturer_id: course.lecturer_id,
            join_code: course.join_code,
            settings: course.settings,
            created: course.created,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDTO {
    pub course_id: ID,
    pub recipient_id: ID,
    pub enrolled_at: i64,
    pub notifications_enabled: bool,
}

impl EnrollmentDTO {
    pub fn new(enrollment: Enrollment) -> Self {
        Self {
            course_id: enrollment.course_id,
            recipient_id: enrollment.recipient_id,
            enrolled_at: enrollment.enrolled_at,
            notifications_enabled: enrollment.notifications_enabled,
        }
    }
}
