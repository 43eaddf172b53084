use crate::rrt::error::PlannerError;
use crate::rrt::state::RealVectorState;
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces configuration space samples.
pub trait SamplingDistribution<F: Float, const N: usize> {
    /// Draws one sample.
    fn sample(&mut self) -> RealVectorState<F, N>;
}

/// Samples uniformly inside an axis-aligned box.
pub struct UniformDistribution<F: Float, const N: usize> {
    ranges: [(F, F); N],
    rng: StdRng,
}

impl<F: Float, const N: usize> UniformDistribution<F, N> {
    /// Creates a distribution seeded from the operating system.
    ///
    /// Parameters:
    /// - `ranges`: The `(low, high)` range of every dimension.
    pub fn new(ranges: [(F, F); N]) -> Result<Self, PlannerError> {
        Self::with_rng(ranges, StdRng::from_entropy())
    }

    /// Creates a reproducible distribution.
    pub fn with_seed(ranges: [(F, F); N], seed: u64) -> Result<Self, PlannerError> {
        Self::with_rng(ranges, StdRng::seed_from_u64(seed))
    }

    fn with_rng(ranges: [(F, F); N], rng: StdRng) -> Result<Self, PlannerError> {
        for (i, (low, high)) in ranges.iter().enumerate() {
            if !(low.is_finite() && high.is_finite() && low < high) {
                return Err(PlannerError::InvalidParameter(format!(
                    "sampling range of dimension {} must be finite with low < high",
                    i
                )));
            }
        }
        Ok(Self { ranges, rng })
    }
}

impl<F: Float, const N: usize> SamplingDistribution<F, N> for UniformDistribution<F, N> {
    fn sample(&mut self) -> RealVectorState<F, N> {
        let mut state = RealVectorState::zeros();
        for i in 0..N {
            let (low, high) = self.ranges[i];
            let t = F::from(self.rng.gen::<f64>()).unwrap_or_else(F::zero);
            state[i] = low + (high - low) * t;
        }
        state
    }
}

/// Replays a fixed list of states, wrapping around at the end.
///
/// Used to reproduce a recorded run or to drive the planner through a scripted scenario.
pub struct ReplayDistribution<F: Float, const N: usize> {
    states: Vec<RealVectorState<F, N>>,
    next: usize,
}

impl<F: Float, const N: usize> ReplayDistribution<F, N> {
    pub fn new(states: Vec<RealVectorState<F, N>>) -> Result<Self, PlannerError> {
        if states.is_empty() {
            return Err(PlannerError::InvalidParameter(
                "a replay distribution needs at least one state".to_string(),
            ));
        }
        Ok(Self { states, next: 0 })
    }

    /// Number of samples drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl<F: Float, const N: usize> SamplingDistribution<F, N> for ReplayDistribution<F, N> {
    fn sample(&mut self) -> RealVectorState<F, N> {
        let state = self.states[self.next % self.states.len()];
        self.next += 1;
        state
    }
}
