use crate::obstacles::AnalyticObstacle;
use crate::rrt::state::RealVectorState;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// An axis-aligned box obstacle. The boundary counts as part of the obstacle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaticRectangularObstacle<F: Float, const N: usize> {
    min_corner: RealVectorState<F, N>,
    max_corner: RealVectorState<F, N>,
}

impl<F: Float, const N: usize> StaticRectangularObstacle<F, N> {
    /// Creates a box from two opposite corners, given in any order.
    pub fn new(a: RealVectorState<F, N>, b: RealVectorState<F, N>) -> Self {
        let mut min_corner = a;
        let mut max_corner = b;
        for i in 0..N {
            min_corner[i] = a[i].min(b[i]);
            max_corner[i] = a[i].max(b[i]);
        }
        Self {
            min_corner,
            max_corner,
        }
    }

    pub fn min_corner(&self) -> &RealVectorState<F, N> {
        &self.min_corner
    }

    pub fn max_corner(&self) -> &RealVectorState<F, N> {
        &self.max_corner
    }

    /// Clips the parameter interval `[t_enter, t_exit]` of `start + t * direction` against
    /// one slab. Returns None once the interval is empty.
    fn clip_slab(
        start: F,
        direction: F,
        low: F,
        high: F,
        (t_enter, t_exit): (F, F),
    ) -> Option<(F, F)> {
        if direction == F::zero() {
            return if start < low || start > high {
                None
            } else {
                Some((t_enter, t_exit))
            };
        }
        let a = (low - start) / direction;
        let b = (high - start) / direction;
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let interval = (t_enter.max(near), t_exit.min(far));
        if interval.0 > interval.1 {
            None
        } else {
            Some(interval)
        }
    }
}

impl<F: Float, const N: usize> AnalyticObstacle<F, N> for StaticRectangularObstacle<F, N> {
    fn contains(&self, state: &RealVectorState<F, N>) -> bool {
        (0..N).all(|i| state[i] >= self.min_corner[i] && state[i] <= self.max_corner[i])
    }

    fn intersects_edge(&self, start: &RealVectorState<F, N>, end: &RealVectorState<F, N>) -> bool {
        let direction = end - start;
        let mut interval = (F::zero(), F::one());
        for i in 0..N {
            match Self::clip_slab(
                start[i],
                direction[i],
                self.min_corner[i],
                self.max_corner[i],
                interval,
            ) {
                Some(clipped) => interval = clipped,
                None => return false,
            }
        }
        true
    }
}
