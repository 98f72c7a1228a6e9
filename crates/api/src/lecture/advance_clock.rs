use crate::shared::{mutate_lecture::mutate_lecture, usecase::UseCase};
use futures::future;
use lecture_alerts_domain::{LectureTransition, ID};
use lecture_alerts_infra::LectureContext;
use tracing::{error, info};

/// Moves every unfinished `Lecture` into the state it should be in at `now`
#[derive(Debug)]
pub struct AdvanceClockUseCase {
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for AdvanceClockUseCase {
    type Response = Vec<LectureTransition>;

    type Error = UseCaseError;

    const NAME: &'static str = "AdvanceClock";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        let now = self.now;
        let due = ctx
            .repos
            .lectures
            .find_unfinished()
            .await
            .into_iter()
            .filter(|l| l.due_transition(now).is_some())
            .map(|l| l.id)
            .collect::<Vec<_>>();

        let transitions =
            future::join_all(due.iter().map(|lecture_id| advance(lecture_id, now, ctx))).await;

        let transitions = transitions.into_iter().flatten().collect::<Vec<_>>();
        for t in &transitions {
            info!("Lecture: {} went from {} to {}", t.lecture_id, t.from, t.to);
        }
        Ok(transitions)
    }
}

async fn advance(lecture_id: &ID, now: i64, ctx: &LectureContext) -> Option<LectureTransition> {
    // A concurrent cancel wins, `advance` is a no-op on a cancelled lecture
    let res =
        mutate_lecture::<_, (), _>(lecture_id, ctx, |lecture, _| Ok(lecture.advance(now))).await;
    match res {
        Ok((_, transition)) => transition,
        Err(e) => {
            error!("Unable to advance lecture: {}. Err: {:?}", lecture_id, e);
            None
        }
    }
}
