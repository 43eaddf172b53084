use crate::rrt::oracle::VisibilityOracle;
use crate::rrt::state::RealVectorState;
use num_traits::Float;

/// A sampled state with a confirmed straight-line path to the goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntermediateGoal<F: Float, const N: usize> {
    pub state: RealVectorState<F, N>,
    pub distance_to_goal: F,
}

/// Every state seen during the current solve that could see the goal, in discovery order.
///
/// Entries are only ever appended; the planner empties the memory when a new solve
/// starts.
#[derive(Debug, Clone)]
pub struct GoalVisibleMemory<F: Float, const N: usize> {
    entries: Vec<IntermediateGoal<F, N>>,
}

impl<F: Float, const N: usize> GoalVisibleMemory<F, N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, state: RealVectorState<F, N>, distance_to_goal: F) {
        self.entries.push(IntermediateGoal {
            state,
            distance_to_goal,
        });
    }

    pub fn entries(&self) -> &[IntermediateGoal<F, N>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The first entry, in discovery order, that `sample` can see. Stops checking at the
    /// first hit.
    pub fn first_visible_from(
        &self,
        oracle: &VisibilityOracle<F, N>,
        sample: &RealVectorState<F, N>,
    ) -> Option<&IntermediateGoal<F, N>> {
        self.entries
            .iter()
            .find(|entry| oracle.segment_valid(sample, &entry.state))
    }
}
