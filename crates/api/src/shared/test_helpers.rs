use crate::lecture::create_lecture::CreateLectureUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::task::yield_now;
use lecture_alerts_domain::{Course, Enrollment, Lecture, RetryPolicy, ID};
use lecture_alerts_infra::{
    Config, ControlledSys, ILectureRepo, InMemoryLectureRepo, LectureContext,
    RecordingDeliveryChannel, RecordingErrorObserver, Repos, Services,
};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

/// 2023-11-14T22:13:20Z
pub const START: i64 = 1_700_000_000_000;
pub const MINUTE: i64 = 1000 * 60;
pub const HOUR: i64 = 60 * MINUTE;

pub struct TestContext {
    pub ctx: LectureContext,
    pub sys: Arc<ControlledSys>,
    pub channel: Arc<RecordingDeliveryChannel>,
    pub observer: Arc<RecordingErrorObserver>,
}

pub fn setup_test_context() -> TestContext {
    let mut config = Config::new();
    config.delivery_webhook = None;
    config.run_job_schedulers = false;
    config.reminder_offsets = vec![30 * MINUTE];
    config.recurrence_lookahead = 10;
    config.attendance_grace_period = 15 * MINUTE;
    config.delivery_retry_policy = RetryPolicy::exponential(3, 30 * 1000, 30 * MINUTE);
    config.delivery_timeout_millis = 200;

    let sys = Arc::new(ControlledSys::new(START));
    let channel = Arc::new(RecordingDeliveryChannel::new());
    let observer = Arc::new(RecordingErrorObserver::new());
    let ctx = LectureContext {
        repos: Repos::create_inmemory(),
        config,
        sys: sys.clone(),
        services: Services {
            delivery_channel: channel.clone(),
            error_observer: observer.clone(),
        },
    };

    TestContext {
        ctx,
        sys,
        channel,
        observer,
    }
}

pub async fn create_course(ctx: &LectureContext) -> Course {
    let course = Course::new(
        "Web development".into(),
        ID::new(),
        lecture_alerts_utils::create_join_code(8),
        ctx.sys.get_timestamp_millis(),
    );
    ctx.repos.courses.insert(&course).await.unwrap();
    course
}

pub async fn enroll(ctx: &LectureContext, course_id: &ID) -> ID {
    let recipient_id = ID::new();
    let enrollment = Enrollment::new(*course_id, recipient_id, ctx.sys.get_timestamp_millis());
    ctx.repos
        .enrollments
        .insert_if_absent(&enrollment)
        .await
        .unwrap();
    recipient_id
}

pub fn lecture_usecase(course: &Course, start_ts: i64) -> CreateLectureUseCase {
    CreateLectureUseCase {
        course_id: course.id,
        lecturer_id: course.lecturer_id,
        title: "Introduction to React".into(),
        description: None,
        location: Some("Hall B".into()),
        start_ts,
        duration: HOUR,
        recurrence: None,
        idempotency_key: None,
    }
}

pub async fn create_lecture(ctx: &LectureContext, course: &Course, start_ts: i64) -> Lecture {
    execute(lecture_usecase(course, start_ts), ctx)
        .await
        .unwrap()
        .lecture
}

pub async fn mute(ctx: &LectureContext, course_id: &ID, recipient_id: &ID) {
    ctx.repos
        .enrollments
        .set_notifications_enabled(course_id, recipient_id, false)
        .await
        .unwrap();
}

/// In-memory lecture store that lets a test get in the way of writers
pub struct InterferingLectureRepo {
    inner: InMemoryLectureRepo,
    /// Yield to other tasks before every read and save, so that concurrent
    /// usecases interleave
    interleave: AtomicBool,
    /// Number of upcoming saves that another writer gets in ahead of
    saves_to_overtake: AtomicUsize,
    fail_inserts: AtomicBool,
}

impl InterferingLectureRepo {
    /// Installs the repo in the context
    pub fn install(ctx: &mut LectureContext) -> Arc<Self> {
        let repo = Arc::new(Self {
            inner: InMemoryLectureRepo::new(),
            interleave: AtomicBool::new(false),
            saves_to_overtake: AtomicUsize::new(0),
            fail_inserts: AtomicBool::new(false),
        });
        ctx.repos.lectures = repo.clone();
        repo
    }

    pub fn interleave(&self) {
        self.interleave.store(true, Ordering::SeqCst);
    }

    /// Before each of the next `times` saves, another writer changes the
    /// description of the stored lecture
    pub fn overtake_next_saves(&self, times: usize) {
        self.saves_to_overtake.store(times, Ordering::SeqCst);
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    async fn maybe_yield(&self) {
        if self.interleave.load(Ordering::SeqCst) {
            yield_now().await;
        }
    }
}

#[async_trait::async_trait]
impl ILectureRepo for InterferingLectureRepo {
    async fn insert(&self, lecture: &Lecture) -> anyhow::Result<()> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("Lecture store is unavailable"));
        }
        self.inner.insert(lecture).await
    }

    async fn compare_and_save(&self, lecture: &Lecture) -> anyhow::Result<Option<Lecture>> {
        self.maybe_yield().await;
        let overtake = self
            .saves_to_overtake
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if overtake {
            if let Some(mut stored) = self.inner.find(&lecture.id).await {
                stored.description = Some(format!("Edited elsewhere {}", stored.version));
                self.inner.compare_and_save(&stored).await?;
            }
        }
        self.inner.compare_and_save(lecture).await
    }

    async fn find(&self, lecture_id: &ID) -> Option<Lecture> {
        self.maybe_yield().await;
        self.inner.find(lecture_id).await
    }

    async fn find_by_course(&self, course_id: &ID, start_ts: i64, end_ts: i64) -> Vec<Lecture> {
        self.inner.find_by_course(course_id, start_ts, end_ts).await
    }

    async fn find_unfinished(&self) -> Vec<Lecture> {
        self.inner.find_unfinished().await
    }

    async fn find_by_series(&self, series_id: &ID) -> Vec<Lecture> {
        self.inner.find_by_series(series_id).await
    }
}
