use crate::obstacles::AnalyticObstacle;
use crate::rrt::state::RealVectorState;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A ball obstacle. Only the open interior is blocked, so touching the surface is allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticSphericalObstacle<F: Float, const N: usize> {
    center: RealVectorState<F, N>,
    radius: F,
}

impl<F: Float, const N: usize> StaticSphericalObstacle<F, N> {
    pub fn new(center: RealVectorState<F, N>, radius: F) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> &RealVectorState<F, N> {
        &self.center
    }

    pub fn radius(&self) -> F {
        self.radius
    }
}

impl<F: Float, const N: usize> AnalyticObstacle<F, N> for StaticSphericalObstacle<F, N> {
    fn contains(&self, state: &RealVectorState<F, N>) -> bool {
        self.center.euclidean_distance_squared(state) < self.radius * self.radius
    }

    fn intersects_edge(&self, start: &RealVectorState<F, N>, end: &RealVectorState<F, N>) -> bool {
        // Project the center onto the segment and test the closest point.
        let direction = end - start;
        let length_squared = direction.norm_squared();
        let t = if length_squared == F::zero() {
            F::zero()
        } else {
            ((&self.center - start).dot(&direction) / length_squared)
                .max(F::zero())
                .min(F::one())
        };
        self.contains(&start.lerp(end, t))
    }
}
