use lecture_alerts_domain::{Lecture, ID};
use lecture_alerts_infra::LectureContext;
use tracing::{error, warn};

/// Number of times a change is re-applied when other writers keep saving
/// the same lecture in between
const MAX_SAVE_ATTEMPTS: usize = 10;

#[derive(Debug)]
pub enum MutateLectureError<E> {
    NotFound,
    Rejected(E),
    Contention,
    StorageError,
}

/// Applies `change` to the stored `Lecture` and saves it with an optimistic
/// version check. When another writer saved the lecture first, the lecture
/// is read again and `change` is applied again to the fresh copy.
///
/// `change` returns `None` when it left the lecture untouched, in which case
/// nothing is saved.
pub async fn mutate_lecture<T, E, F>(
    lecture_id: &ID,
    ctx: &LectureContext,
    mut change: F,
) -> Result<(Lecture, Option<T>), MutateLectureError<E>>
where
    F: FnMut(&mut Lecture, i64) -> Result<Option<T>, E>,
{
    for _ in 0..MAX_SAVE_ATTEMPTS {
        let mut lecture = ctx
            .repos
            .lectures
            .find(lecture_id)
            .await
            .ok_or(MutateLectureError::NotFound)?;
        let now = ctx.sys.get_timestamp_millis();

        let res = match change(&mut lecture, now).map_err(MutateLectureError::Rejected)? {
            Some(res) => res,
            None => return Ok((lecture, None)),
        };

        match ctx.repos.lectures.compare_and_save(&lecture).await {
            Ok(Some(saved)) => return Ok((saved, Some(res))),
            Ok(None) => continue,
            Err(e) => {
                error!("Unable to save lecture: {}. Err: {:?}", lecture_id, e);
                return Err(MutateLectureError::StorageError);
            }
        }
    }

    warn!(
        "Gave up saving lecture: {} after {} conflicting writes",
        lecture_id, MAX_SAVE_ATTEMPTS
    );
    Err(MutateLectureError::Contention)
}
