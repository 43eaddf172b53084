use crate::rrt::error::PlannerError;
use crate::rrt::state::RealVectorState;
use num_traits::Float;

/// The configuration space the planner works in.
///
/// The planner only needs a distance, an interpolation and a notion of how finely a
/// segment should be subdivided. `distance` is not required to be symmetric.
pub trait StateSpace<F: Float, const N: usize> {
    /// Cost of moving from `from` to `to`. Always non-negative.
    fn distance(&self, from: &RealVectorState<F, N>, to: &RealVectorState<F, N>) -> F;

    /// The state at fraction `t` of the way from `from` to `to`.
    fn interpolate(
        &self,
        from: &RealVectorState<F, N>,
        to: &RealVectorState<F, N>,
        t: F,
    ) -> RealVectorState<F, N>;

    /// Number of segments needed to cover the motion at the space's validity resolution.
    /// Never zero.
    fn valid_segment_count(&self, from: &RealVectorState<F, N>, to: &RealVectorState<F, N>)
        -> usize;

    /// Largest possible distance between two states of the space.
    fn maximum_extent(&self) -> F;
}

/// A bounded Euclidean space with straight-line interpolation.
#[derive(Debug, Clone)]
pub struct EuclideanSpace<F: Float, const N: usize> {
    bounds: [(F, F); N],
    longest_valid_segment: F,
}

impl<F: Float, const N: usize> EuclideanSpace<F, N> {
    /// Fraction of the maximum extent used as the default validity resolution.
    const LONGEST_VALID_SEGMENT_FRACTION: f64 = 0.01;

    /// Creates a space over the given `(low, high)` bounds per dimension.
    pub fn new(bounds: [(F, F); N]) -> Result<Self, PlannerError> {
        for (i, (low, high)) in bounds.iter().enumerate() {
            if !(low.is_finite() && high.is_finite() && low < high) {
                return Err(PlannerError::InvalidParameter(format!(
                    "bounds of dimension {} must be finite with low < high",
                    i
                )));
            }
        }
        let mut space = Self {
            bounds,
            longest_valid_segment: F::one(),
        };
        let fraction = F::from(Self::LONGEST_VALID_SEGMENT_FRACTION).unwrap_or_else(F::epsilon);
        space.longest_valid_segment = space.maximum_extent() * fraction;
        Ok(space)
    }

    /// Overrides the validity resolution.
    pub fn with_longest_valid_segment(mut self, length: F) -> Result<Self, PlannerError> {
        if !(length.is_finite() && length > F::zero()) {
            return Err(PlannerError::InvalidParameter(
                "longest valid segment must be positive".to_string(),
            ));
        }
        self.longest_valid_segment = length;
        Ok(self)
    }

    pub fn bounds(&self) -> &[(F, F); N] {
        &self.bounds
    }

    pub fn longest_valid_segment(&self) -> F {
        self.longest_valid_segment
    }

    pub fn contains(&self, state: &RealVectorState<F, N>) -> bool {
        (0..N).all(|i| state[i] >= self.bounds[i].0 && state[i] <= self.bounds[i].1)
    }
}

impl<F: Float, const N: usize> StateSpace<F, N> for EuclideanSpace<F, N> {
    fn distance(&self, from: &RealVectorState<F, N>, to: &RealVectorState<F, N>) -> F {
        from.euclidean_distance(to)
    }

    fn interpolate(
        &self,
        from: &RealVectorState<F, N>,
        to: &RealVectorState<F, N>,
        t: F,
    ) -> RealVectorState<F, N> {
        from.lerp(to, t)
    }

    fn valid_segment_count(
        &self,
        from: &RealVectorState<F, N>,
        to: &RealVectorState<F, N>,
    ) -> usize {
        let segments = (self.distance(from, to) / self.longest_valid_segment).ceil();
        segments.to_usize().unwrap_or(1).max(1)
    }

    fn maximum_extent(&self) -> F {
        self.bounds
            .iter()
            .fold(F::zero(), |acc, &(low, high)| acc + (high - low) * (high - low))
            .sqrt()
    }
}
