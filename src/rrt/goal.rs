use crate::rrt::state::RealVectorState;
use num_traits::Float;
use rand::rngs::StdRng;

/// The region the planner is trying to reach.
pub trait Goal<F: Float, const N: usize> {
    /// Tests a state against the goal.
    ///
    /// Returns whether the state satisfies the goal together with the residual gap, the
    /// distance still left to cover. The gap is reported even when the state satisfies
    /// the goal.
    fn is_satisfied(&self, state: &RealVectorState<F, N>) -> (bool, F);

    /// Whether [`Goal::sample_goal`] can produce states.
    fn can_sample(&self) -> bool {
        false
    }

    /// Draws a state from inside the goal region.
    fn sample_goal(&self, _rng: &mut StdRng) -> Option<RealVectorState<F, N>> {
        None
    }

    /// A single state that stands for the goal when testing line of sight.
    fn representative_state(&self) -> Option<&RealVectorState<F, N>> {
        None
    }
}

/// A goal given by one state and a tolerance ball around it.
#[derive(Debug, Clone)]
pub struct GoalState<F: Float, const N: usize> {
    state: RealVectorState<F, N>,
    tolerance: F,
}

impl<F: Float, const N: usize> GoalState<F, N> {
    pub fn new(state: RealVectorState<F, N>, tolerance: F) -> Self {
        Self { state, tolerance }
    }

    pub fn state(&self) -> &RealVectorState<F, N> {
        &self.state
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }
}

impl<F: Float, const N: usize> Goal<F, N> for GoalState<F, N> {
    fn is_satisfied(&self, state: &RealVectorState<F, N>) -> (bool, F) {
        let gap = state.euclidean_distance(&self.state);
        (gap <= self.tolerance, gap)
    }

    fn can_sample(&self) -> bool {
        true
    }

    fn sample_goal(&self, _rng: &mut StdRng) -> Option<RealVectorState<F, N>> {
        Some(self.state)
    }

    fn representative_state(&self) -> Option<&RealVectorState<F, N>> {
        Some(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn tolerance_is_inclusive() {
        let goal = GoalState::new(RealVectorState::new([3.0, 4.0]), 5.0);
        assert_eq!(goal.is_satisfied(&RealVectorState::new([0.0, 0.0])), (true, 5.0));
        let (satisfied, gap) = goal.is_satisfied(&RealVectorState::new([0.0, -1.0]));
        assert!(!satisfied);
        assert!(gap > 5.0);
    }

    #[test]
    fn samples_are_the_goal_state() {
        let goal = GoalState::new(RealVectorState::new([1.0, 2.0]), 0.1);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(goal.can_sample());
        assert_eq!(goal.sample_goal(&mut rng), Some(*goal.state()));
        assert_eq!(goal.representative_state(), Some(goal.state()));
    }
}
