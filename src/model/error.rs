/// Errors raised by the planner core.
///
/// Invalid user input (an empty task name, a zero-day selection) is not an
/// error; those submissions are reported through
/// [`SubmitOutcome::Ignored`](super::planner::SubmitOutcome).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}
