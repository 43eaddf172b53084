//! Guide state selection.
//!
//! Every iteration a [`SelectionStrategy`] picks the single state the tree should grow
//! towards. Strategies reason about samples, the goal and their own memory only; they
//! never read or modify the tree.

pub mod combined;
pub mod memory;
pub mod visibility;

pub use combined::CombinedDistanceSelection;
pub use memory::{GoalVisibleMemory, IntermediateGoal};
pub use visibility::{IntermediateRanking, VisibilitySelection};

use crate::rrt::error::PlannerError;
use crate::rrt::goal::Goal;
use crate::rrt::oracle::VisibilityOracle;
use crate::rrt::sampling::SamplingDistribution;
use crate::rrt::state::RealVectorState;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a strategy may look at while choosing a guide state.
pub struct SelectionContext<'a, F: Float, const N: usize> {
    pub oracle: &'a VisibilityOracle<F, N>,
    pub goal: &'a dyn Goal<F, N>,
    pub sampler: &'a mut dyn SamplingDistribution<F, N>,
    /// The first start state of the tree.
    pub reference_start: &'a RealVectorState<F, N>,
}

/// Picks one guide state per iteration.
pub trait SelectionStrategy<F: Float, const N: usize> {
    fn select(&mut self, ctx: &mut SelectionContext<'_, F, N>) -> RealVectorState<F, N>;

    /// Forgets everything learned during the previous solve.
    fn reset(&mut self);

    fn name(&self) -> &'static str;

    /// The goal-visible memory, for strategies that keep one.
    fn goal_visible_memory(&self) -> Option<&GoalVisibleMemory<F, N>> {
        None
    }
}

/// The available selection strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Prefer samples that see the goal, then samples that see a remembered goal-visible
    /// state, both ranked by distance to the goal.
    Visibility,
    /// Like `Visibility`, but samples that only see a remembered state are ranked by the
    /// length of the two-leg route through that state.
    ChainedVisibility,
    /// Optional direct goal sampling, otherwise the sample minimising distance from the
    /// start plus remaining goal gap.
    CombinedDistance,
}

impl SelectionPolicy {
    pub const ALL: [SelectionPolicy; 3] = [
        SelectionPolicy::Visibility,
        SelectionPolicy::ChainedVisibility,
        SelectionPolicy::CombinedDistance,
    ];

    /// Whether the goal must provide a representative state for line-of-sight tests.
    pub fn requires_goal_state(&self) -> bool {
        match self {
            SelectionPolicy::Visibility | SelectionPolicy::ChainedVisibility => true,
            SelectionPolicy::CombinedDistance => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPolicy::Visibility => "visibility",
            SelectionPolicy::ChainedVisibility => "chained_visibility",
            SelectionPolicy::CombinedDistance => "combined_distance",
        }
    }

    /// Builds the strategy for this policy.
    ///
    /// `seed` drives the strategy's own randomness (goal biasing); None seeds from the
    /// operating system.
    pub fn build<F: Float + 'static, const N: usize>(
        &self,
        batch_size: usize,
        goal_bias: f64,
        seed: Option<u64>,
    ) -> Box<dyn SelectionStrategy<F, N>> {
        match self {
            SelectionPolicy::Visibility => Box::new(VisibilitySelection::new(batch_size)),
            SelectionPolicy::ChainedVisibility => {
                Box::new(VisibilitySelection::chained(batch_size))
            }
            SelectionPolicy::CombinedDistance => {
                Box::new(CombinedDistanceSelection::new(batch_size, goal_bias, seed))
            }
        }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::Visibility
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SelectionPolicy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectionPolicy::ALL
            .iter()
            .find(|policy| policy.as_str() == s)
            .copied()
            .ok_or_else(|| {
                PlannerError::InvalidConfig(format!("unknown selection policy '{}'", s))
            })
    }
}

/// Draws `batch_size` samples.
pub(crate) fn draw_batch<F: Float, const N: usize>(
    sampler: &mut dyn SamplingDistribution<F, N>,
    batch_size: usize,
) -> Vec<RealVectorState<F, N>> {
    (0..batch_size).map(|_| sampler.sample()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_parse_from_their_names() {
        for policy in SelectionPolicy::ALL {
            assert_eq!(policy.as_str().parse::<SelectionPolicy>().unwrap(), policy);
        }
        assert!("rrt_connect".parse::<SelectionPolicy>().is_err());
    }

    #[test]
    fn built_strategies_report_their_names() {
        let names: Vec<&str> = SelectionPolicy::ALL
            .iter()
            .map(|p| p.build::<f64, 2>(4, 0.05, Some(1)).name())
            .collect();
        assert_eq!(
            names,
            vec!["VisibilityRRT", "ChainedVisibilityRRT", "CombinedDistanceRRT"]
        );
    }
}
