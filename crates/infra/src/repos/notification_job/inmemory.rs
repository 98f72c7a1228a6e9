use super::INotificationJobRepo;
use lecture_alerts_domain::{JobId, JobQueueKey, NotificationJob, ID};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Default)]
struct JobQueue {
    jobs: BTreeMap<JobQueueKey, NotificationJob>,
    keys: HashMap<JobId, JobQueueKey>,
    by_lecture: HashMap<ID, HashSet<JobId>>,
    /// Newest schedule revision queued per lecture. `i64::MAX` once closed.
    revisions: HashMap<ID, i64>,
}

impl JobQueue {
    fn push(&mut self, job: NotificationJob) {
        self.remove(&job.id);
        let key = job.queue_key();
        self.keys.insert(job.id.clone(), key.clone());
        self.by_lecture
            .entry(job.lecture_id)
            .or_default()
            .insert(job.id.clone());
        self.jobs.insert(key, job);
    }

    fn remove(&mut self, job_id: &JobId) -> Option<NotificationJob> {
        let key = self.keys.remove(job_id)?;
        let job = self.jobs.remove(&key)?;
        if let Some(ids) = self.by_lecture.get_mut(&job.lecture_id) {
            ids.remove(job_id);
            if ids.is_empty() {
                self.by_lecture.remove(&job.lecture_id);
            }
        }
        Some(job)
    }

    fn remove_lecture(&mut self, lecture_id: &ID) -> Vec<NotificationJob> {
        let ids = self.by_lecture.remove(lecture_id).unwrap_or_default();
        let mut removed = ids
            .iter()
            .filter_map(|id| {
                let key = self.keys.remove(id)?;
                self.jobs.remove(&key)
            })
            .collect::<Vec<_>>();
        removed.sort_by_key(|job| job.queue_key());
        removed
    }
}

/// All edits happen inside one short critical section and the lock is never
/// held across an `.await`.
pub struct InMemoryNotificationJobRepo {
    queue: Mutex<JobQueue>,
}

impl InMemoryNotificationJobRepo {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(JobQueue::default()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationJobRepo for InMemoryNotificationJobRepo {
    async fn insert(&self, jobs: &[NotificationJob]) -> anyhow::Result<()> {
        let mut queue = self.queue.lock();
        for job in jobs {
            queue.push(job.clone());
        }
        Ok(())
    }

    async fn replace_for_lecture(
        &self,
        lecture_id: &ID,
        revision: i64,
        jobs: &[NotificationJob],
    ) -> anyhow::Result<Option<Vec<NotificationJob>>> {
        if jobs.iter().any(|job| job.lecture_id != *lecture_id) {
            return Err(anyhow::anyhow!(
                "Can only replace jobs with jobs of the same lecture: {}",
                lecture_id
            ));
        }
        let mut queue = self.queue.lock();
        let current = queue.revisions.entry(*lecture_id).or_insert(revision);
        if *current > revision {
            return Ok(None);
        }
        *current = revision;
        let removed = queue.remove_lecture(lecture_id);
        for job in jobs {
            queue.push(job.clone());
        }
        Ok(Some(removed))
    }

    async fn close_lecture(&self, lecture_id: &ID) -> Vec<NotificationJob> {
        let mut queue = self.queue.lock();
        queue.revisions.insert(*lecture_id, i64::MAX);
        queue.remove_lecture(lecture_id)
    }

    async fn delete_all_before(&self, before: i64) -> Vec<NotificationJob> {
        let mut queue = self.queue.lock();
        let due = queue
            .jobs
            .keys()
            .take_while(|(fire_at, ..)| *fire_at <= before)
            .map(|(.., job_id)| job_id.clone())
            .collect::<Vec<_>>();
        due.iter().filter_map(|id| queue.remove(id)).collect()
    }

    async fn find_by_lecture(&self, lecture_id: &ID) -> Vec<NotificationJob> {
        let queue = self.queue.lock();
        let mut jobs = queue
            .by_lecture
            .get(lecture_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| queue.keys.get(id))
                    .filter_map(|key| queue.jobs.get(key).cloned())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        jobs.sort_by_key(|job| job.queue_key());
        jobs
    }
}
