use thiserror::Error;

/// Errors reported by the planner and its configuration layer.
///
/// A rejected extension is not an error: the iteration simply adds nothing. Running out
/// of time before reaching the goal is reported through [`crate::rrt::PlannerStatus`].
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("there are no valid initial states")]
    InvalidStart,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("the {0} selection policy needs a goal with a representative state")]
    GoalStateRequired(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
