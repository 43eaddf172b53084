use crate::rrt::space::StateSpace;
use crate::rrt::state::RealVectorState;
use crate::rrt::validity_checker::ValidityChecker;
use num_traits::Float;
use std::cell::Cell;

/// Answers the geometric questions the planner asks on every iteration.
///
/// Wraps the state space and the validity checker. Segment checks dominate the cost of an
/// iteration, so the oracle counts them.
pub struct VisibilityOracle<F: Float, const N: usize> {
    space: Box<dyn StateSpace<F, N>>,
    validity_checker: Box<dyn ValidityChecker<F, N>>,
    segment_checks: Cell<usize>,
}

impl<F: Float, const N: usize> VisibilityOracle<F, N> {
    pub fn new(
        space: Box<dyn StateSpace<F, N>>,
        validity_checker: Box<dyn ValidityChecker<F, N>>,
    ) -> Self {
        Self {
            space,
            validity_checker,
            segment_checks: Cell::new(0),
        }
    }

    pub fn space(&self) -> &dyn StateSpace<F, N> {
        self.space.as_ref()
    }

    pub fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool {
        self.validity_checker.is_state_valid(state)
    }

    /// Whether the whole straight motion from `a` to `b` is free. `a` is assumed valid,
    /// as it always is for tree nodes; `b` and the segment are checked.
    pub fn segment_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool {
        self.segment_checks.set(self.segment_checks.get() + 1);
        self.validity_checker.is_state_valid(b) && self.validity_checker.is_edge_valid(a, b)
    }

    pub fn distance(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> F {
        self.space.distance(a, b)
    }

    /// Moves from `from` towards `towards` by at most `max_step`.
    pub fn steer(
        &self,
        from: &RealVectorState<F, N>,
        towards: &RealVectorState<F, N>,
        max_step: F,
    ) -> RealVectorState<F, N> {
        let distance = self.space.distance(from, towards);
        if distance <= max_step {
            *towards
        } else {
            self.space.interpolate(from, towards, max_step / distance)
        }
    }

    /// Discretises the motion from `from` to `to` at the space's validity resolution.
    /// The first state equals `from` and the last equals `to`.
    pub fn expand(
        &self,
        from: &RealVectorState<F, N>,
        to: &RealVectorState<F, N>,
    ) -> Vec<RealVectorState<F, N>> {
        let count = self.space.valid_segment_count(from, to).max(1);
        let step = F::one() / F::from(count).unwrap_or_else(F::one);
        let mut states = Vec::with_capacity(count + 1);
        states.push(*from);
        for i in 1..count {
            let t = F::from(i).unwrap_or_else(F::zero) * step;
            states.push(self.space.interpolate(from, to, t));
        }
        states.push(*to);
        states
    }

    /// Number of [`VisibilityOracle::segment_valid`] calls made so far.
    pub fn segment_checks(&self) -> usize {
        self.segment_checks.get()
    }
}
