use crate::{lecture::Lecture, shared::entity::ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

const MAX_ANNOUNCEMENT_KEY_LENGTH: usize = 64;

/// Declaration order is the release order for jobs that fire at the same
/// time for the same lecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Reminder,
    ScheduleChange,
    Cancellation,
    AdHocAnnouncement,
}

impl NotificationKind {
    fn slug(&self) -> &'static str {
        match self {
            Self::Reminder => "reminder",
            Self::ScheduleChange => "schedule-change",
            Self::Cancellation => "cancellation",
            Self::AdHocAnnouncement => "announcement",
        }
    }
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidAnnouncementKeyError {
    #[error("The idempotency key cannot be empty")]
    Empty,
    #[error("The idempotency key cannot be longer than {0} characters")]
    TooLong(usize),
    #[error("The idempotency key can only contain letters, digits, '-' and '_'")]
    InvalidCharacters,
}

/// Identifier of a `NotificationJob`.
///
/// Ids are never random. They are derived from what the job is about so that
/// the same event always maps to the same id, which is what makes repeated
/// dispatches of a job collapse onto the same delivery records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn derived(lecture_id: &ID, kind: NotificationKind, fire_at: i64, revision: i64) -> Self {
        Self(format!("{}-{}-{}-r{}", lecture_id, kind, fire_at, revision))
    }

    pub fn cancellation(lecture_id: &ID) -> Self {
        Self(format!("{}-{}", lecture_id, NotificationKind::Cancellation))
    }

    pub fn announcement(lecture_id: &ID, key: &str) -> Result<Self, InvalidAnnouncementKeyError> {
        if key.is_empty() {
            return Err(InvalidAnnouncementKeyError::Empty);
        }
        if key.len() > MAX_ANNOUNCEMENT_KEY_LENGTH {
            return Err(InvalidAnnouncementKeyError::TooLong(
                MAX_ANNOUNCEMENT_KEY_LENGTH,
            ));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InvalidAnnouncementKeyError::InvalidCharacters);
        }
        Ok(Self(format!(
            "{}-{}-{}",
            lecture_id,
            NotificationKind::AdHocAnnouncement,
            key
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What gets handed to the delivery channel. The engine only carries the
/// lecture facts, any free text comes from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub lecture_id: ID,
    pub course_id: ID,
    pub kind: NotificationKind,
    pub title: String,
    pub start_ts: i64,
    pub location: Option<String>,
    pub message: Option<String>,
}

impl NotificationPayload {
    pub fn new(lecture: &Lecture, kind: NotificationKind, message: Option<String>) -> Self {
        Self {
            lecture_id: lecture.id,
            course_id: lecture.course_id,
            kind,
            title: lecture.title.clone(),
            start_ts: lecture.start_ts,
            location: lecture.location.clone(),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationJob {
    pub id: JobId,
    pub lecture_id: ID,
    pub course_id: ID,
    pub kind: NotificationKind,
    pub fire_at: i64,
    pub payload: NotificationPayload,
}

/// Total order in which due jobs are released
pub type JobQueueKey = (i64, ID, NotificationKind, JobId);

impl NotificationJob {
    fn new(lecture: &Lecture, id: JobId, kind: NotificationKind, fire_at: i64) -> Self {
        Self {
            id,
            lecture_id: lecture.id,
            course_id: lecture.course_id,
            kind,
            fire_at,
            payload: NotificationPayload::new(lecture, kind, None),
        }
    }

    /// One reminder per offset (millis before start). Reminders that
    /// should already have fired are not created.
    pub fn reminders(lecture: &Lecture, offsets: &[i64], now: i64) -> Vec<Self> {
        let mut fire_times = offsets
            .iter()
            .map(|offset| lecture.start_ts - offset)
            .filter(|fire_at| *fire_at >= now)
            .collect::<Vec<_>>();
        fire_times.sort_unstable();
        fire_times.dedup();

        fire_times
            .into_iter()
            .map(|fire_at| {
                let id = JobId::derived(
                    &lecture.id,
                    NotificationKind::Reminder,
                    fire_at,
                    lecture.schedule_revision,
                );
                Self::new(lecture, id, NotificationKind::Reminder, fire_at)
            })
            .collect()
    }

    pub fn schedule_change(lecture: &Lecture, now: i64) -> Self {
        let kind = NotificationKind::ScheduleChange;
        let id = JobId::derived(&lecture.id, kind, now, lecture.schedule_revision);
        Self::new(lecture, id, kind, now)
    }

    pub fn cancellation(lecture: &Lecture, now: i64) -> Self {
        Self::new(
            lecture,
            JobId::cancellation(&lecture.id),
            NotificationKind::Cancellation,
            now,
        )
    }

    pub fn announcement(
        lecture: &Lecture,
        message: String,
        key: &str,
        now: i64,
    ) -> Result<Self, InvalidAnnouncementKeyError> {
        let kind = NotificationKind::AdHocAnnouncement;
        let mut job = Self::new(lecture, JobId::announcement(&lecture.id, key)?, kind, now);
        job.payload.message = Some(message);
        Ok(job)
    }

    pub fn queue_key(&self) -> JobQueueKey {
        (self.fire_at, self.lecture_id, self.kind, self.id.clone())
    }
}
