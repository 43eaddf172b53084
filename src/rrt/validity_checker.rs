use crate::rrt::state::RealVectorState;
use num_traits::Float;

/// Decides which states and straight-line motions are collision free.
pub trait ValidityChecker<F: Float, const N: usize> {
    /// Checks if a state is valid (i.e., does not collide with obstacles).
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool;

    /// Checks if the straight motion from `a` to `b` is valid, including both end points.
    fn is_edge_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool;
}

/// Accepts every state and motion. Useful for obstacle-free spaces.
pub struct AlwaysValid<F: Float, const N: usize> {
    _phantom: std::marker::PhantomData<F>,
}

impl<F: Float, const N: usize> AlwaysValid<F, N> {
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<F: Float, const N: usize> Default for AlwaysValid<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, const N: usize> ValidityChecker<F, N> for AlwaysValid<F, N> {
    fn is_state_valid(&self, _state: &RealVectorState<F, N>) -> bool {
        true
    }

    fn is_edge_valid(&self, _a: &RealVectorState<F, N>, _b: &RealVectorState<F, N>) -> bool {
        true
    }
}

/// Combines several checkers; a state or motion is valid only if every checker agrees.
pub struct UnionValidityChecker<F: Float, const N: usize> {
    checkers: Vec<Box<dyn ValidityChecker<F, N>>>,
}

impl<F: Float, const N: usize> UnionValidityChecker<F, N> {
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    pub fn add_checker(&mut self, checker: Box<dyn ValidityChecker<F, N>>) {
        self.checkers.push(checker);
    }

    /// Builder-style variant of [`UnionValidityChecker::add_checker`].
    pub fn with_checker(mut self, checker: Box<dyn ValidityChecker<F, N>>) -> Self {
        self.add_checker(checker);
        self
    }
}

impl<F: Float, const N: usize> Default for UnionValidityChecker<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, const N: usize> ValidityChecker<F, N> for UnionValidityChecker<F, N> {
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool {
        self.checkers.iter().all(|c| c.is_state_valid(state))
    }

    fn is_edge_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool {
        self.checkers.iter().all(|c| c.is_edge_valid(a, b))
    }
}

/// Keeps states inside an axis-aligned box. A straight motion between two states inside
/// the box never leaves it, so edges only need their end points checked.
pub struct BoundsValidityChecker<F: Float, const N: usize> {
    bounds: [(F, F); N],
}

impl<F: Float, const N: usize> BoundsValidityChecker<F, N> {
    pub fn new(bounds: [(F, F); N]) -> Self {
        Self { bounds }
    }
}

impl<F: Float, const N: usize> ValidityChecker<F, N> for BoundsValidityChecker<F, N> {
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool {
        self.bounds
            .iter()
            .enumerate()
            .all(|(i, &(low, high))| state[i] >= low && state[i] <= high)
    }

    fn is_edge_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool {
        self.is_state_valid(a) && self.is_state_valid(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_requires_all_checkers() {
        let union = UnionValidityChecker::new()
            .with_checker(Box::new(AlwaysValid::new()))
            .with_checker(Box::new(BoundsValidityChecker::new([(0.0, 1.0), (0.0, 1.0)])));

        let inside = RealVectorState::new([0.5, 0.5]);
        let outside = RealVectorState::new([1.5, 0.5]);
        assert!(union.is_state_valid(&inside));
        assert!(!union.is_state_valid(&outside));
        assert!(!union.is_edge_valid(&inside, &outside));
    }

    #[test]
    fn empty_union_accepts_everything() {
        let union = UnionValidityChecker::<f64, 2>::new();
        assert!(union.is_state_valid(&RealVectorState::new([1e9, -1e9])));
    }
}
