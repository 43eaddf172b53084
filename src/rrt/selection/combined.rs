use crate::rrt::selection::{draw_batch, SelectionContext, SelectionStrategy};
use crate::rrt::state::RealVectorState;
use crate::util::argmin_by_key;
use log::trace;
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Goal-biased selection that scores samples by how much of a start-to-goal route they
/// would lie on.
///
/// With probability `goal_bias`, and only when the goal can be sampled, the guide is a
/// goal sample. Otherwise a batch is drawn and the guide is the sample minimising
/// `distance(start, sample) + gap(sample)`, where the gap is the goal's residual distance.
pub struct CombinedDistanceSelection {
    batch_size: usize,
    goal_bias: f64,
    rng: StdRng,
}

impl CombinedDistanceSelection {
    /// Creates the strategy.
    ///
    /// Parameters:
    /// - `batch_size`: Number of uniform samples scored per iteration.
    /// - `goal_bias`: Probability of steering straight at a goal sample.
    /// - `seed`: Seed for the goal-bias coin; None seeds from the operating system.
    pub fn new(batch_size: usize, goal_bias: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            batch_size: batch_size.max(1),
            goal_bias,
            rng,
        }
    }

    pub fn goal_bias(&self) -> f64 {
        self.goal_bias
    }
}

impl<F: Float, const N: usize> SelectionStrategy<F, N> for CombinedDistanceSelection {
    fn select(&mut self, ctx: &mut SelectionContext<'_, F, N>) -> RealVectorState<F, N> {
        if ctx.goal.can_sample() && self.rng.gen::<f64>() < self.goal_bias {
            if let Some(goal_sample) = ctx.goal.sample_goal(&mut self.rng) {
                trace!("steering at a goal sample");
                return goal_sample;
            }
        }

        let batch = draw_batch(&mut *ctx.sampler, self.batch_size);
        let oracle = ctx.oracle;
        let goal = ctx.goal;
        let start = ctx.reference_start;
        let best = argmin_by_key(batch.iter(), |sample| {
            oracle.distance(start, sample) + goal.is_satisfied(sample).1
        });
        match best {
            Some(sample) => *sample,
            None => ctx.sampler.sample(),
        }
    }

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "CombinedDistanceRRT"
    }
}
