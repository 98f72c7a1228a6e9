use crate::dtos::{CourseDTO, EnrollmentDTO, LectureDTO};
use lecture_alerts_domain::{Course, Enrollment, Lecture, Tz, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub course: CourseDTO,
}

impl CourseResponse {
    pub fn new(course: Course) -> Self {
        Self {
            course: CourseDTO::new(course),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub enrollment: EnrollmentDTO,
}

impl EnrollmentResponse {
    pub fn new(enrollment: Enrollment) -> Self {
        Self {
            enrollment: EnrollmentDTO::new(enrollment),
        }
    }
}

pub mod create_course {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub lecturer_id: ID,
        #[serde(default)]
        pub timezone: Option<Tz>,
        #[serde(default)]
        pub week_start: Option<usize>,
        /// A retried request with the same key returns the course created
        /// by the first one
        #[serde(default)]
        pub idempotency_key: Option<String>,
    }

    pub type APIResponse = CourseResponse;
}

pub mod get_course {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub course_id: ID,
    }

    pub type APIResponse = CourseResponse;
}

pub mod join_course {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub join_code: String,
        pub recipient_id: ID,
    }

    pub type APIResponse = EnrollmentResponse;
}

pub mod enroll_recipient {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub course_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub recipient_id: ID,
    }

    pub type APIResponse = EnrollmentResponse;
}

pub mod unenroll_recipient {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub course_id: ID,
        pub recipient_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// The removed enrollment, `None` if the recipient was not enrolled
        pub enrollment: Option<EnrollmentDTO>,
    }

    impl APIResponse {
        pub fn new(enrollment: Option<Enrollment>) -> Self {
            Self {
                enrollment: enrollment.map(EnrollmentDTO::new),
            }
        }
    }
}

pub mod set_notification_preference {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub course_id: ID,
        pub recipient_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub notifications_enabled: bool,
    }

    pub type APIResponse = EnrollmentResponse;
}

pub mod get_upcoming_lectures {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub course_id: ID,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub start_ts: i64,
        pub end_ts: i64,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub lectures: Vec<LectureDTO>,
    }

    impl APIResponse {
        pub fn new(lectures: Vec<Lecture>) -> Self {
            Self {
                lectures: lectures.into_iter().map(LectureDTO::new).collect(),
            }
        }
    }
}
