use lecture_alerts_domain::{Lecture, LectureState, RRuleOptions, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LectureDTO {
    pub id: ID,
    pub course_id: ID,
    pub lecturer_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_ts: i64,
    pub duration: i64,
    pub end_ts: i64,
    pub state: LectureState,
    pub recurrence: Option<RRuleOptions>,
    pub series_id: Option<ID>,
    pub schedule_revision: i64,
    pub created: i64,
    pub updated: i64,
}

impl LectureDTO {
    pub fn new(lecture: Lecture) -> Self {
        Self {
            id: lecture.id,
            course_id: lecture.course_id,
            lecturer_id: lecture.lecturer_id,
            end_ts: lecture.end_ts(),
            title: lecture.title,
            description: lecture.description,
            location: lecture.location,
            start_ts: lecture.start_ts,
            duration: lecture.duration,
            state: lecture.state,
            recurrence: lecture.recurrence,
            series_id: lecture.series_id,
            schedule_revision: lecture.schedule_revision,
            created: lecture.created,
            updated: lecture.updated,
        }
    }
}
