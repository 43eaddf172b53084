use crate::rrt::state::RealVectorState;
use crate::rrt::validity_checker::ValidityChecker;
use num_traits::Float;

/// An obstacle with exact containment and segment intersection tests.
/// No discretisation of the segment is needed to check a motion against it.
pub trait AnalyticObstacle<F: Float, const N: usize> {
    fn contains(&self, state: &RealVectorState<F, N>) -> bool;
    fn intersects_edge(&self, start: &RealVectorState<F, N>, end: &RealVectorState<F, N>) -> bool;
}

/// A validity checker over a set of analytic obstacles, optionally restricted to a
/// bounding box.
///
/// Motions are checked exactly, so a segment that merely grazes an obstacle between two
/// free end points is still rejected.
pub struct AnalyticValidityChecker<F: Float, const N: usize> {
    obstacles: Vec<Box<dyn AnalyticObstacle<F, N>>>,
    bounds: Option<[(F, F); N]>,
}

impl<F: Float, const N: usize> AnalyticValidityChecker<F, N> {
    /// Creates a checker for the given obstacles with unbounded free space.
    pub fn new(obstacles: Vec<Box<dyn AnalyticObstacle<F, N>>>) -> Self {
        Self {
            obstacles,
            bounds: None,
        }
    }

    /// Restricts valid states to the `(low, high)` box.
    pub fn with_bounds(mut self, bounds: [(F, F); N]) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn add_obstacle(&mut self, obstacle: Box<dyn AnalyticObstacle<F, N>>) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    fn in_bounds(&self, state: &RealVectorState<F, N>) -> bool {
        match &self.bounds {
            Some(bounds) => (0..N).all(|i| state[i] >= bounds[i].0 && state[i] <= bounds[i].1),
            None => true,
        }
    }
}

impl<F: Float, const N: usize> ValidityChecker<F, N> for AnalyticValidityChecker<F, N> {
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool {
        self.in_bounds(state) && self.obstacles.iter().all(|o| !o.contains(state))
    }

    fn is_edge_valid(&self, start: &RealVectorState<F, N>, end: &RealVectorState<F, N>) -> bool {
        // The bounds are convex, so checking the end points covers the whole segment.
        self.in_bounds(start)
            && self.in_bounds(end)
            && self.obstacles.iter().all(|o| !o.intersects_edge(start, end))
    }
}
