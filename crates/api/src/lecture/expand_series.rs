use super::subscribers::ScheduleNotificationsOnSeriesExpanded;
use crate::shared::{
    mutate_lecture::{mutate_lecture, MutateLectureError},
    usecase::{Subscriber, UseCase},
};
use futures::future;
use lecture_alerts_domain::{Course, Lecture, LectureState, SeriesExpansionJob, ID};
use lecture_alerts_infra::LectureContext;
use tracing::error;

/// Tops up recurring `Lecture` series whose `SeriesExpansionJob`s are due so
/// that the configured number of future occurrences stays materialized
#[derive(Debug)]
pub struct ExpandSeriesUseCase {
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for ExpandSeriesUseCase {
    /// The occurrences that were materialized
    type Response = Vec<Lecture>;

    type Error = UseCaseError;

    const NAME: &'static str = "ExpandSeries";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let jobs = ctx
            .repos
            .series_expansion_jobs
            .delete_all_before(self.now)
            .await;

        let expanded = future::join_all(
            jobs.into_iter()
                .map(|job| expand_series(job.series_id, self.now, ctx))
                .collect::<Vec<_>>(),
        )
        .await;

        Ok(expanded.into_iter().flatten().collect())
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleNotificationsOnSeriesExpanded)]
    }
}

async fn expand_series(series_id: ID, now: i64, ctx: &LectureContext) -> Vec<Lecture> {
    let root = match ctx.repos.lectures.find(&series_id).await {
        Some(root) if root.state != LectureState::Cancelled => root,
        _ => return Vec::new(),
    };
    let course = match ctx.repos.courses.find(&root.course_id).await {
        Some(course) => course,
        None => return Vec::new(),
    };

    let upcoming = ctx
        .repos
        .lectures
        .find_by_series(&series_id)
        .await
        .into_iter()
        .filter(|l| l.start_ts > now && l.state != LectureState::Cancelled)
        .count();
    let missing = ctx.config.recurrence_lookahead.saturating_sub(upcoming);

    // Claim the next occurrences on the root first so that concurrent
    // expansions never materialize the same occurrence twice
    let claimed = mutate_lecture::<_, (), _>(&series_id, ctx, |root, now| {
        let after = root.materialized_until.unwrap_or(root.start_ts);
        let starts = root.next_occurrences(&course.settings, after, missing);
        match starts.last() {
            Some(last) => {
                root.materialized_until = Some(*last);
                root.updated = now;
                Ok(Some(starts))
            }
            None => Ok(None),
        }
    })
    .await;

    let (root, starts) = match claimed {
        Ok((root, Some(starts))) => (root, starts),
        Ok((root, None)) => (root, Vec::new()),
        Err(MutateLectureError::NotFound) => return Vec::new(),
        Err(e) => {
            error!("Unable to expand lecture series: {}. Err: {:?}", series_id, e);
            return Vec::new();
        }
    };

    let occurrences = match materialize_occurrences(&root, &starts, ctx).await {
        Ok(occurrences) => occurrences,
        Err(e) => {
            error!("Unable to store lecture series: {}. Err: {:?}", series_id, e);
            return Vec::new();
        }
    };

    schedule_next_expansion(&root, now, ctx).await;
    occurrences
}

/// Creates one `Lecture` per start timestamp of the series
pub async fn materialize_occurrences(
    root: &Lecture,
    starts: &[i64],
    ctx: &LectureContext,
) -> anyhow::Result<Vec<Lecture>> {
    let now = ctx.sys.get_timestamp_millis();
    let mut occurrences = Vec::with_capacity(starts.len());
    for start_ts in starts {
        let occurrence = root.new_occurrence(*start_ts, now);
        ctx.repos.lectures.insert(&occurrence).await?;
        occurrences.push(occurrence);
    }
    Ok(occurrences)
}

/// Series are expanded again once the next occurrence has started
pub async fn schedule_next_expansion(root: &Lecture, now: i64, ctx: &LectureContext) {
    let next_start = ctx
        .repos
        .lectures
        .find_by_series(&root.id)
        .await
        .into_iter()
        .map(|l| l.start_ts)
        .find(|start_ts| *start_ts > now);

    if let Some(timestamp) = next_start {
        let job = SeriesExpansionJob {
            series_id: root.id,
            timestamp,
        };
        if ctx
            .repos
            .series_expansion_jobs
            .bulk_insert(&[job])
            .await
            .is_err()
        {
            error!(
                "Unable to store series expansion job for lecture: {}",
                root.id
            );
        }
    }
}

/// Start timestamps of the first occurrences of a new series
pub fn initial_occurrences(root: &Lecture, course: &Course, lookahead: usize) -> Vec<i64> {
    root.next_occurrences(&course.settings, root.start_ts, lookahead)
}
