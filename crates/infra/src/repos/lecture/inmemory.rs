use super::ILectureRepo;
use crate::repos::shared::inmemory_repo::*;
use dashmap::{mapref::entry::Entry, DashMap};
use lecture_alerts_domain::{Lecture, LectureState, ID};

pub struct InMemoryLectureRepo {
    lectures: DashMap<ID, Lecture>,
}

impl InMemoryLectureRepo {
    pub fn new() -> Self {
        Self {
            lectures: DashMap::new(),
        }
    }
}

#[async_trait::async_trait]
impl ILectureRepo for InMemoryLectureRepo {
    async fn insert(&self, lecture: &Lecture) -> anyhow::Result<()> {
        insert(lecture, &self.lectures);
        Ok(())
    }

    async fn compare_and_save(&self, lecture: &Lecture) -> anyhow::Result<Option<Lecture>> {
        match self.lectures.entry(lecture.id) {
            Entry::Occupied(mut stored) => {
                if stored.get().version != lecture.version {
                    return Ok(None);
                }
                let mut saved = lecture.clone();
                saved.version += 1;
                stored.insert(saved.clone());
                Ok(Some(saved))
            }
            Entry::Vacant(_) => Err(anyhow::anyhow!(
                "Lecture with id: {} does not exist",
                lecture.id
            )),
        }
    }

    async fn find(&self, lecture_id: &ID) -> Option<Lecture> {
        find(lecture_id, &self.lectures)
    }

    async fn find_by_course(&self, course_id: &ID, start_ts: i64, end_ts: i64) -> Vec<Lecture> {
        let mut lectures = find_by(&self.lectures, |l| {
            l.course_id == *course_id && l.start_ts >= start_ts && l.start_ts <= end_ts
        });
        lectures.sort_by_key(|l| (l.start_ts, l.id));
        lectures
    }

    async fn find_unfinished(&self) -> Vec<Lecture> {
        find_by(&self.lectures, |l| {
            matches!(l.state, LectureState::Scheduled | LectureState::InProgress)
        })
    }

    async fn find_by_series(&self, series_id: &ID) -> Vec<Lecture> {
        let mut lectures = find_by(&self.lectures, |l| l.series_id == Some(*series_id));
        lectures.sort_by_key(|l| l.start_ts);
        lectures
    }
}
