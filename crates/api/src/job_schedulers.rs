use crate::{
    lecture::{advance_clock::AdvanceClockUseCase, expand_series::ExpandSeriesUseCase},
    notification::{
        dispatch::{DispatchNotificationUseCase, DispatchReport},
        poll_due::PollDueNotificationsUseCase,
        retry_failed_deliveries::{RetryFailedDeliveriesUseCase, RetryReport},
    },
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use futures::future::{self, Future};
use lecture_alerts_domain::NotificationJob;
use lecture_alerts_infra::LectureContext;
use std::time::Duration;
use tracing::{error, info, info_span};
use tracing_futures::Instrument;

/// Millis until the next multiple of `interval_millis`, so that ticks line up
/// with wall clock boundaries
pub fn get_start_delay(now_ts: i64, interval_millis: i64) -> i64 {
    if interval_millis <= 0 {
        return 0;
    }
    interval_millis - now_ts.rem_euclid(interval_millis)
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct JobTick {
    pub now: i64,
    pub transitions: usize,
    pub expanded: usize,
    pub dispatched: usize,
    pub delivered: usize,
    pub retried: usize,
}

/// Moves lectures through their states and materializes series occurrences.
/// Returns the number of transitions and of new occurrences.
async fn advance_lectures(now: i64, ctx: &LectureContext) -> (usize, usize) {
    let transitions = match execute(AdvanceClockUseCase { now }, ctx).await {
        Ok(transitions) => transitions.len(),
        Err(e) => match e {},
    };
    let expanded = match execute(ExpandSeriesUseCase { now }, ctx).await {
        Ok(occurrences) => occurrences.len(),
        Err(e) => match e {},
    };
    (transitions, expanded)
}

async fn poll_due(now: i64, ctx: &LectureContext) -> Vec<NotificationJob> {
    match execute(PollDueNotificationsUseCase { now }, ctx).await {
        Ok(due) => due,
        Err(e) => match e {},
    }
}

async fn dispatch(job: NotificationJob, ctx: &LectureContext) -> Option<DispatchReport> {
    let job_id = job.id.clone();
    match execute(DispatchNotificationUseCase { job }, ctx).await {
        Ok(report) => Some(report),
        Err(e) => {
            error!("Unable to dispatch notification: {}. Err: {:?}", job_id, e);
            None
        }
    }
}

async fn retry_failed(now: i64, ctx: &LectureContext) -> RetryReport {
    match execute(RetryFailedDeliveriesUseCase { now }, ctx).await {
        Ok(report) => report,
        Err(e) => match e {},
    }
}

/// Runs one round of all background work: lecture state transitions, series
/// expansion, due notifications and delivery retries, in that order. Due
/// notifications are dispatched concurrently.
pub async fn run_job_tick(ctx: &LectureContext) -> JobTick {
    let now = ctx.sys.get_timestamp_millis();
    let mut tick = JobTick {
        now,
        ..Default::default()
    };

    let (transitions, expanded) = advance_lectures(now, ctx).await;
    tick.transitions = transitions;
    tick.expanded = expanded;

    let due = poll_due(now, ctx).await;
    let reports = future::join_all(due.into_iter().map(|job| dispatch(job, ctx))).await;
    for report in reports.into_iter().flatten() {
        tick.dispatched += 1;
        tick.delivered += report.delivered;
    }

    let retries = retry_failed(now, ctx).await;
    tick.retried = retries.retried;
    tick.delivered += retries.delivered;

    tick
}

/// Runs `job` on every tick of its own interval, on its own task
fn spawn_interval_job<F, Fut>(
    ctx: LectureContext,
    interval_millis: u64,
    name: &'static str,
    job: F,
) where
    F: Fn(LectureContext) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    actix_web::rt::spawn(async move {
        let delay = get_start_delay(ctx.sys.get_timestamp_millis(), interval_millis as i64);
        sleep_until(Instant::now() + Duration::from_millis(delay as u64)).await;

        let mut ticks = interval(Duration::from_millis(interval_millis));
        loop {
            ticks.tick().await;
            job(ctx.clone())
                .instrument(info_span!("Job tick", job = name))
                .await;
        }
    });
}

/// Starts the background jobs. Advancing lectures, dispatching due
/// notifications and retrying failed deliveries each run on their own
/// interval, and every due notification is dispatched on its own task, so a
/// slow delivery for one lecture never holds up the others.
pub fn start_job_scheduler(ctx: LectureContext) {
    let interval_millis = ctx.config.job_tick_interval_millis.max(1);

    spawn_interval_job(ctx.clone(), interval_millis, "advance_lectures", |ctx| async move {
        let now = ctx.sys.get_timestamp_millis();
        let (transitions, expanded) = advance_lectures(now, &ctx).await;
        if transitions > 0 || expanded > 0 {
            info!(
                "Advanced {} lectures and materialized {} occurrences at {}",
                transitions, expanded, now
            );
        }
    });

    spawn_interval_job(ctx.clone(), interval_millis, "dispatch_due", |ctx| async move {
        let now = ctx.sys.get_timestamp_millis();
        for job in poll_due(now, &ctx).await {
            let ctx = ctx.clone();
            actix_web::rt::spawn(
                async move {
                    dispatch(job, &ctx).await;
                }
                .in_current_span(),
            );
        }
    });

    spawn_interval_job(ctx, interval_millis, "retry_failed", |ctx| async move {
        let now = ctx.sys.get_timestamp_millis();
        let report = retry_failed(now, &ctx).await;
        if report.retried > 0 {
            info!(
                "Retried {} deliveries at {}, {} delivered",
                report.retried, now, report.delivered
            );
        }
    });
}
