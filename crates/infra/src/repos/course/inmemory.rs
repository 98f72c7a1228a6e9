use super::ICourseRepo;
use crate::repos::shared::inmemory_repo::*;
use dashmap::{mapref::entry::Entry, DashMap};
use lecture_alerts_domain::{Course, ID};

pub struct InMemoryCourseRepo {
    courses: DashMap<ID, Course>,
    join_codes: DashMap<String, ID>,
}

impl InMemoryCourseRepo {
    pub fn new() -> Self {
        Self {
            courses: DashMap::new(),
            join_codes: DashMap::new(),
        }
    }
}

#[async_trait::async_trait]
impl ICourseRepo for InMemoryCourseRepo {
    async fn insert(&self, course: &Course) -> anyhow::Result<()> {
        match self.join_codes.entry(course.join_code.to_uppercase()) {
            Entry::Occupied(_) => Err(anyhow::anyhow!(
                "Join code: {} is already in use",
                course.join_code
            )),
            Entry::Vacant(code) => {
                code.insert(course.id);
                insert(course, &self.courses);
                Ok(())
            }
        }
    }

    async fn find(&self, course_id: &ID) -> Option<Course> {
        find(course_id, &self.courses)
    }

    async fn find_by_join_code(&self, join_code: &str) -> Option<Course> {
        let course_id = *self.join_codes.get(&join_code.trim().to_uppercase())?;
        find(&course_id, &self.courses)
    }
}
