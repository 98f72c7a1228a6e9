mod attendance;
mod course;
mod delivery;
mod enrollment;
mod kv;
mod lecture;
mod notification_job;
mod series_expansion_job;
mod shared;

use attendance::{IAttendanceRepo, InMemoryAttendanceRepo};
use course::{ICourseRepo, InMemoryCourseRepo};
use delivery::{IDeliveryRepo, InMemoryDeliveryRepo};
use enrollment::{IEnrollmentRepo, InMemoryEnrollmentRepo};
use kv::{IKVRepo, InMemoryKVRepo};
use notification_job::{INotificationJobRepo, InMemoryNotificationJobRepo};
use series_expansion_job::{ISeriesExpansionJobRepo, InMemorySeriesExpansionJobRepo};
use std::sync::Arc;

pub use delivery::AttemptFilter;
pub use lecture::{ILectureRepo, InMemoryLectureRepo};

#[derive(Clone)]
pub struct Repos {
    pub lectures: Arc<dyn ILectureRepo>,
    pub courses: Arc<dyn ICourseRepo>,
    pub enrollments: Arc<dyn IEnrollmentRepo>,
    pub notification_jobs: Arc<dyn INotificationJobRepo>,
    pub series_expansion_jobs: Arc<dyn ISeriesExpansionJobRepo>,
    pub deliveries: Arc<dyn IDeliveryRepo>,
    pub attendance: Arc<dyn IAttendanceRepo>,
    pub key_values: Arc<dyn IKVRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            lectures: Arc::new(InMemoryLectureRepo::new()),
            courses: Arc::new(InMemoryCourseRepo::new()),
            enrollments: Arc::new(InMemoryEnrollmentRepo::new()),
            notification_jobs: Arc::new(InMemoryNotificationJobRepo::new()),
            series_expansion_jobs: Arc::new(InMemorySeriesExpansionJobRepo::new()),
            deliveries: Arc::new(InMemoryDeliveryRepo::new()),
            attendance: Arc::new(InMemoryAttendanceRepo::new()),
            key_values: Arc::new(InMemoryKVRepo::new()),
        }
    }
}
