use crate::shared::entity::ID;

/// Marks the point in time at which more occurrences of a recurring
/// `Lecture` series should be materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesExpansionJob {
    /// Id of the lecture owning the recurrence rule
    pub series_id: ID,
    pub timestamp: i64,
}
