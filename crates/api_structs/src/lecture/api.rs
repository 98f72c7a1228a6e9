use crate::dtos::LectureDTO;
use lecture_alerts_domain::{JobId, Lecture, NotificationJob, RRuleOptions, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureResponse {
    pub lecture: LectureDTO,
}

impl LectureResponse {
    pub fn new(lecture: Lecture) -> Self {
        Self {
            lecture: LectureDTO::new(lecture),
        }
    }
}

pub mod create_lecture {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub course_id: ID,
        pub lecturer_id: ID,
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        pub start_ts: i64,
        pub duration: i64,
        #[serde(default)]
        pub recurrence: Option<RRuleOptions>,
        #[serde(default)]
        pub idempotency_key: Option<String>,
    }

    pub type APIResponse = LectureResponse;
}

pub mod get_lecture {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub lecture_id: ID,
    }

    pub type APIResponse = LectureResponse;
}

pub mod update_lecture {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub lecture_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub start_ts: Option<i64>,
        #[serde(default)]
        pub duration: Option<i64>,
    }

    pub type APIResponse = LectureResponse;
}

pub mod cancel_lecture {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub lecture_id: ID,
    }

    pub type APIResponse = LectureResponse;
}

pub mod send_announcement {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub lecture_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message: String,
        /// Sending twice with the same key notifies every recipient once
        pub idempotency_key: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub job_id: JobId,
        pub fire_at: i64,
    }

    impl APIResponse {
        pub fn new(job: NotificationJob) -> Self {
            Self {
                job_id: job.id,
                fire_at: job.fire_at,
            }
        }
    }
}
