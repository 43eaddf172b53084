pub mod config;
pub mod error;
pub mod goal;
pub mod neighbors;
pub mod oracle;
pub mod planner;
pub mod planner_data;
pub mod sampling;
pub mod selection;
pub mod solution;
pub mod space;
pub mod state;
pub mod status;
pub mod termination;
pub mod tree;
pub mod validity_checker;

pub use config::PlannerConfig;
pub use error::PlannerError;
pub use goal::{Goal, GoalState};
pub use neighbors::{KdTreeNearestNeighbors, LinearNearestNeighbors, NearestNeighbors};
pub use oracle::VisibilityOracle;
pub use planner::{Extension, Planner};
pub use planner_data::PlannerData;
pub use sampling::{ReplayDistribution, SamplingDistribution, UniformDistribution};
pub use selection::{
    CombinedDistanceSelection, GoalVisibleMemory, IntermediateGoal, SelectionPolicy,
    SelectionStrategy, VisibilitySelection,
};
pub use solution::{SolutionPath, SolutionTracker};
pub use space::{EuclideanSpace, StateSpace};
pub use state::RealVectorState;
pub use status::PlannerStatus;
pub use termination::{
    AnyTermination, FnTermination, MaxIterationsTermination, MaxTimeTermination,
    TerminationCondition,
};
pub use tree::{MotionTree, Node};
pub use validity_checker::{AlwaysValid, BoundsValidityChecker, UnionValidityChecker, ValidityChecker};
