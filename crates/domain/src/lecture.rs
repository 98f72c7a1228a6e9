use crate::{
    course::CourseSettings,
    shared::entity::{Entity, ID},
    shared::recurrence::{RRuleOptions, MAX_RECURRENCE_SPAN_MILLIS},
};
use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

const DAY: i64 = 1000 * 60 * 60 * 24;
/// How far ahead of now a lecture may be scheduled
pub const MAX_SCHEDULE_HORIZON_MILLIS: i64 = DAY * 366 * 10;
pub const MAX_LECTURE_DURATION_MILLIS: i64 = DAY * 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LectureState {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl LectureState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl Display for LectureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", state)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum LectureError {
    #[error("Invalid lecture: {0}")]
    Validation(String),
    #[error("Cannot {operation} a lecture that is {state}")]
    InvalidState {
        state: LectureState,
        operation: &'static str,
    },
}

/// A single scheduled session of a `Course`.
#[derive(Debug, Clone)]
pub struct Lecture {
    pub id: ID,
    pub course_id: ID,
    pub lecturer_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_ts: i64,
    pub duration: i64,
    pub state: LectureState,
    /// Only set on the lecture that owns a recurring series
    pub recurrence: Option<RRuleOptions>,
    /// Set on occurrences materialized from a recurring lecture
    pub series_id: Option<ID>,
    /// Start of the last occurrence materialized for this series
    pub materialized_until: Option<i64>,
    /// Bumped every time the start or duration changes. Part of the
    /// identity of derived notification jobs so that a reminder for an
    /// older schedule is never mistaken for the current one.
    pub schedule_revision: i64,
    /// Optimistic concurrency counter, bumped on every saved change
    pub version: i64,
    pub created: i64,
    pub updated: i64,
}

/// Fields a lecturer may change on an existing `Lecture`
#[derive(Debug, Clone, Default)]
pub struct LecturePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_ts: Option<i64>,
    pub duration: Option<i64>,
}

impl LecturePatch {
    fn touches_schedule(&self, lecture: &Lecture) -> bool {
        self.start_ts.map(|ts| ts != lecture.start_ts).unwrap_or(false)
            || self.duration.map(|d| d != lecture.duration).unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LectureTransition {
    pub lecture_id: ID,
    pub from: LectureState,
    pub to: LectureState,
}

impl Lecture {
    pub fn validate_title(title: &str) -> Result<(), LectureError> {
        if title.trim().is_empty() {
            return Err(LectureError::Validation("title is required".into()));
        }
        Ok(())
    }

    pub fn validate_schedule(start_ts: i64, duration: i64, now: i64) -> Result<(), LectureError> {
        if start_ts < now {
            return Err(LectureError::Validation(
                "start time cannot be in the past".into(),
            ));
        }
        if start_ts > now.saturating_add(MAX_SCHEDULE_HORIZON_MILLIS) {
            return Err(LectureError::Validation(
                "start time is too far in the future".into(),
            ));
        }
        if duration <= 0 {
            return Err(LectureError::Validation(
                "duration must be a positive number of milliseconds".into(),
            ));
        }
        if duration > MAX_LECTURE_DURATION_MILLIS {
            return Err(LectureError::Validation(
                "duration cannot be longer than 7 days".into(),
            ));
        }
        if start_ts.checked_add(duration).is_none() {
            return Err(LectureError::Validation("end time is out of range".into()));
        }
        Ok(())
    }

    pub fn end_ts(&self) -> i64 {
        self.start_ts.saturating_add(self.duration)
    }

    pub fn is_series_root(&self) -> bool {
        self.recurrence.is_some()
    }

    /// The id of the series this lecture is part of, if any
    pub fn series(&self) -> Option<ID> {
        if self.is_series_root() {
            Some(self.id)
        } else {
            self.series_id
        }
    }

    /// The state this lecture should be in at `now`, if that differs from
    /// its current state.
    pub fn due_transition(&self, now: i64) -> Option<LectureState> {
        match self.state {
            LectureState::Scheduled if now >= self.end_ts() => Some(LectureState::Completed),
            LectureState::Scheduled if now >= self.start_ts => Some(LectureState::InProgress),
            LectureState::InProgress if now >= self.end_ts() => Some(LectureState::Completed),
            _ => None,
        }
    }

    /// Moves the lecture to the state it should be in at `now`. A lecture
    /// that slept through its whole slot goes straight to `Completed`, so
    /// there is never more than one transition per call.
    pub fn advance(&mut self, now: i64) -> Option<LectureTransition> {
        let to = self.due_transition(now)?;
        let transition = LectureTransition {
            lecture_id: self.id,
            from: self.state,
            to,
        };
        self.state = to;
        self.updated = now;
        Some(transition)
    }

    /// Returns `true` when the lecture was rescheduled
    pub fn apply_patch(&mut self, patch: &LecturePatch, now: i64) -> Result<bool, LectureError> {
        if self.state.is_terminal() {
            return Err(LectureError::InvalidState {
                state: self.state,
                operation: "update",
            });
        }

        let reschedule = patch.touches_schedule(self);
        if reschedule {
            if self.state != LectureState::Scheduled {
                return Err(LectureError::InvalidState {
                    state: self.state,
                    operation: "reschedule",
                });
            }
            let start_ts = patch.start_ts.unwrap_or(self.start_ts);
            let duration = patch.duration.unwrap_or(self.duration);
            Self::validate_schedule(start_ts, duration, now)?;
            if self.is_series_root() {
                if let Some(rrule) = &self.recurrence {
                    if !rrule.is_valid(start_ts) {
                        return Err(LectureError::Validation(
                            "the recurrence rule is not valid for the new start time".into(),
                        ));
                    }
                }
            }
        }
        if let Some(title) = &patch.title {
            Self::validate_title(title)?;
        }

        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(location) = &patch.location {
            self.location = Some(location.clone());
        }
        if reschedule {
            if let Some(start_ts) = patch.start_ts {
                self.start_ts = start_ts;
            }
            if let Some(duration) = patch.duration {
                self.duration = duration;
            }
            self.schedule_revision += 1;
        }
        self.updated = now;

        Ok(reschedule)
    }

    /// Returns `true` if this call cancelled the lecture and `false` if it
    /// was already cancelled.
    pub fn cancel(&mut self, now: i64) -> Result<bool, LectureError> {
        match self.state {
            LectureState::Cancelled => Ok(false),
            LectureState::Completed => Err(LectureError::InvalidState {
                state: self.state,
                operation: "cancel",
            }),
            _ => {
                self.state = LectureState::Cancelled;
                self.updated = now;
                Ok(true)
            }
        }
    }

    /// Attendance is taken while the lecture runs and for `grace_period`
    /// millis after it has ended.
    pub fn accepts_attendance(&self, at: i64, grace_period: i64) -> bool {
        match self.state {
            LectureState::InProgress => true,
            LectureState::Completed => at <= self.end_ts().saturating_add(grace_period),
            _ => false,
        }
    }

    /// Start timestamps of the occurrences of this series strictly after
    /// `after_ts`, at most `limit` of them.
    pub fn next_occurrences(
        &self,
        settings: &CourseSettings,
        after_ts: i64,
        limit: usize,
    ) -> Vec<i64> {
        let rrule = match &self.recurrence {
            Some(rrule) => rrule,
            None => return Vec::new(),
        };
        let tzid = settings.timezone;
        // Open ended rules are only looked at one span ahead at a time
        let window_start = tzid.timestamp_millis(after_ts);
        let window_end =
            tzid.timestamp_millis(after_ts.saturating_add(MAX_RECURRENCE_SPAN_MILLIS));

        rrule
            .get_rrule_set(self.start_ts, settings)
            .between(window_start, window_end, true)
            .iter()
            .map(|d| d.timestamp_millis())
            .filter(|ts| *ts > after_ts)
            .take(limit)
            .collect()
    }

    /// A standalone lecture for one occurrence of this series
    pub fn new_occurrence(&self, start_ts: i64, now: i64) -> Lecture {
        Lecture {
            id: Default::default(),
            course_id: self.course_id,
            lecturer_id: self.lecturer_id,
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            start_ts,
            duration: self.duration,
            state: LectureState::Scheduled,
            recurrence: None,
            series_id: Some(self.id),
            materialized_until: None,
            schedule_revision: 0,
            version: 0,
            created: now,
            updated: now,
        }
    }
}

impl Entity for Lecture {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::recurrence::RRuleFrequency;

    const HOUR: i64 = 1000 * 60 * 60;

    fn lecture(start_ts: i64) -> Lecture {
        Lecture {
            id: Default::default(),
            course_id: Default::default(),
            lecturer_id: Default::default(),
            title: "Introduction to React".into(),
            description: None,
            location: Some("Hall B".into()),
            start_ts,
            duration: HOUR,
            state: LectureState::Scheduled,
            recurrence: None,
            series_id: None,
            materialized_until: None,
            schedule_revision: 0,
            version: 0,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn advances_through_lifecycle_once_per_state() {
        let mut l = lecture(10 * HOUR);
        assert!(l.advance(9 * HOUR).is_none());

        let t = l.advance(10 * HOUR).unwrap();
        assert_eq!(t.from, LectureState::Scheduled);
        assert_eq!(t.to, LectureState::InProgress);
        assert!(l.advance(10 * HOUR).is_none());

        let t = l.advance(11 * HOUR).unwrap();
        assert_eq!(t.to, LectureState::Completed);
        assert!(l.advance(11 * HOUR).is_none());
        assert!(l.advance(100 * HOUR).is_none());
    }

    #[test]
    fn missed_lecture_jumps_straight_to_completed() {
        let mut l = lecture(10 * HOUR);
        let t = l.advance(12 * HOUR).unwrap();
        assert_eq!(t.from, LectureState::Scheduled);
        assert_eq!(t.to, LectureState::Completed);
    }

    #[test]
    fn cancelled_lecture_never_advances() {
        let mut l = lecture(10 * HOUR);
        assert_eq!(l.cancel(0), Ok(true));
        assert_eq!(l.cancel(0), Ok(false));
        assert!(l.advance(12 * HOUR).is_none());
    }

    #[test]
    fn completed_lecture_cannot_be_cancelled() {
        let mut l = lecture(10 * HOUR);
        l.advance(12 * HOUR);
        assert!(matches!(
            l.cancel(12 * HOUR),
            Err(LectureError::InvalidState { .. })
        ));
    }

    #[test]
    fn start_time_is_immutable_once_started() {
        let mut l = lecture(10 * HOUR);
        l.advance(10 * HOUR);
        let patch = LecturePatch {
            start_ts: Some(20 * HOUR),
            ..Default::default()
        };
        assert_eq!(
            l.apply_patch(&patch, 10 * HOUR),
            Err(LectureError::InvalidState {
                state: LectureState::InProgress,
                operation: "reschedule"
            })
        );

        // Non time fields are still editable
        let patch = LecturePatch {
            location: Some("Room 101".into()),
            ..Default::default()
        };
        assert_eq!(l.apply_patch(&patch, 10 * HOUR), Ok(false));
        assert_eq!(l.location.as_deref(), Some("Room 101"));
    }

    #[test]
    fn reschedule_bumps_revision() {
        let mut l = lecture(10 * HOUR);
        let patch = LecturePatch {
            start_ts: Some(12 * HOUR),
            ..Default::default()
        };
        assert_eq!(l.apply_patch(&patch, 0), Ok(true));
        assert_eq!(l.schedule_revision, 1);
        assert_eq!(l.start_ts, 12 * HOUR);

        // Same start again is not a reschedule
        assert_eq!(l.apply_patch(&patch, 0), Ok(false));
        assert_eq!(l.schedule_revision, 1);
    }

    #[test]
    fn rejects_reschedule_into_the_past() {
        let mut l = lecture(10 * HOUR);
        let patch = LecturePatch {
            start_ts: Some(HOUR),
            ..Default::default()
        };
        assert!(matches!(
            l.apply_patch(&patch, 2 * HOUR),
            Err(LectureError::Validation(_))
        ));
        assert_eq!(l.start_ts, 10 * HOUR);
    }

    #[test]
    fn rejects_schedules_out_of_bounds() {
        let now = 10 * HOUR;
        assert!(Lecture::validate_schedule(now, HOUR, now).is_ok());
        assert!(Lecture::validate_schedule(
            now + MAX_SCHEDULE_HORIZON_MILLIS,
            MAX_LECTURE_DURATION_MILLIS,
            now
        )
        .is_ok());

        for (start_ts, duration) in [
            (i64::MAX - 1000, HOUR),
            (i64::MAX, 1),
            (now + MAX_SCHEDULE_HORIZON_MILLIS + 1, HOUR),
            (now, MAX_LECTURE_DURATION_MILLIS + 1),
            (now, i64::MAX),
        ] {
            assert!(matches!(
                Lecture::validate_schedule(start_ts, duration, now),
                Err(LectureError::Validation(_))
            ));
        }

        let mut l = lecture(now + HOUR);
        let patch = LecturePatch {
            start_ts: Some(i64::MAX - 1000),
            ..Default::default()
        };
        assert!(matches!(
            l.apply_patch(&patch, now),
            Err(LectureError::Validation(_))
        ));
        assert_eq!(l.start_ts, now + HOUR);
    }

    #[test]
    fn end_of_stored_lecture_never_wraps() {
        let mut l = lecture(i64::MAX - 1000);
        assert_eq!(l.end_ts(), i64::MAX);
        assert!(l.advance(20 * HOUR).is_none());
        assert_eq!(l.state, LectureState::Scheduled);
    }

    #[test]
    fn attendance_window_includes_grace_period() {
        let mut l = lecture(10 * HOUR);
        assert!(!l.accepts_attendance(10 * HOUR, 0));
        l.advance(10 * HOUR);
        assert!(l.accepts_attendance(10 * HOUR, 0));
        l.advance(11 * HOUR);
        assert!(l.accepts_attendance(11 * HOUR + 10, 15));
        assert!(!l.accepts_attendance(11 * HOUR + 16, 15));
    }

    #[test]
    fn expands_daily_series() {
        let settings = CourseSettings::default();
        let start_ts = 1_663_072_000_000;
        let mut root = lecture(start_ts);
        root.recurrence = Some(RRuleOptions {
            freq: RRuleFrequency::Daily,
            ..Default::default()
        });

        let occurrences = root.next_occurrences(&settings, start_ts, 3);
        assert_eq!(
            occurrences,
            vec![
                start_ts + 24 * HOUR,
                start_ts + 48 * HOUR,
                start_ts + 72 * HOUR
            ]
        );

        let occurrence = root.new_occurrence(occurrences[0], 0);
        assert_eq!(occurrence.series_id, Some(root.id));
        assert_eq!(occurrence.series(), Some(root.id));
        assert!(occurrence.recurrence.is_none());
    }

    #[test]
    fn series_with_count_stops_expanding() {
        let settings = CourseSettings::default();
        let start_ts = 1_663_072_000_000;
        let mut root = lecture(start_ts);
        root.recurrence = Some(RRuleOptions {
            freq: RRuleFrequency::Daily,
            count: Some(2),
            ..Default::default()
        });
        assert_eq!(root.next_occurrences(&settings, start_ts, 10).len(), 1);
    }
}
