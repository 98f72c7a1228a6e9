use super::IEnrollmentRepo;
use dashmap::DashMap;
use lecture_alerts_domain::{Enrollment, ID};
use std::collections::HashMap;

/// Enrollments grouped per course. Writers lock a single course while
/// readers of other courses are never blocked.
pub struct InMemoryEnrollmentRepo {
    enrollments: DashMap<ID, HashMap<ID, Enrollment>>,
}

impl InMemoryEnrollmentRepo {
    pub fn new() -> Self {
        Self {
            enrollments: DashMap::new(),
        }
    }
}

#[async_trait::async_trait]
impl IEnrollmentRepo for InMemoryEnrollmentRepo {
    async fn insert_if_absent(&self, enrollment: &Enrollment) -> anyhow::Result<Enrollment> {
        let mut course = self.enrollments.entry(enrollment.course_id).or_default();
        let stored = course
            .entry(enrollment.recipient_id)
            .or_insert_with(|| enrollment.clone());
        Ok(stored.clone())
    }

    async fn find(&self, course_id: &ID, recipient_id: &ID) -> Option<Enrollment> {
        self.enrollments
            .get(course_id)
            .and_then(|course| course.get(recipient_id).cloned())
    }

    async fn find_by_course(&self, course_id: &ID) -> Vec<Enrollment> {
        let mut enrollments = self
            .enrollments
            .get(course_id)
            .map(|course| course.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        enrollments.sort_by_key(|e| e.recipient_id);
        enrollments
    }

    async fn delete(&self, course_id: &ID, recipient_id: &ID) -> Option<Enrollment> {
        self.enrollments
            .get_mut(course_id)
            .and_then(|mut course| course.remove(recipient_id))
    }

    async fn set_notifications_enabled(
        &self,
        course_id: &ID,
        recipient_id: &ID,
        enabled: bool,
    ) -> Option<Enrollment> {
        let mut course = self.enrollments.get_mut(course_id)?;
        let enrollment = course.get_mut(recipient_id)?;
        enrollment.notifications_enabled = enabled;
        Some(enrollment.clone())
    }
}
