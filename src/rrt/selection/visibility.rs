use crate::rrt::selection::memory::{GoalVisibleMemory, IntermediateGoal};
use crate::rrt::selection::{draw_batch, SelectionContext, SelectionStrategy};
use crate::rrt::state::RealVectorState;
use crate::util::argmin_by_key;
use log::{trace, warn};
use num_traits::Float;

/// How samples that only see a remembered goal-visible state are ranked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntermediateRanking {
    /// By the sample's own distance to the goal, whatever state it saw.
    ActualGoal,
    /// By the distance to the seen state plus that state's distance to the goal.
    Chained,
}

/// Line-of-sight guided selection.
///
/// Each iteration draws a batch of uniform samples and works through these tiers:
/// 1. Samples with a free straight line to the goal are remembered, and the one closest
///    to the goal becomes the guide.
/// 2. Otherwise, samples that can see any remembered goal-visible state compete. Each
///    sample is checked against the memory in discovery order and stops at the first
///    state it sees. The winner is chosen by [`IntermediateRanking`].
/// 3. Otherwise the sample closest to the goal is the guide.
///
/// Ties always go to the earlier sample of the batch.
pub struct VisibilitySelection<F: Float, const N: usize> {
    batch_size: usize,
    ranking: IntermediateRanking,
    memory: GoalVisibleMemory<F, N>,
}

impl<F: Float, const N: usize> VisibilitySelection<F, N> {
    /// Ranks intermediate matches by their distance to the actual goal.
    pub fn new(batch_size: usize) -> Self {
        Self::with_ranking(batch_size, IntermediateRanking::ActualGoal)
    }

    /// Ranks intermediate matches by the route through the state they see.
    pub fn chained(batch_size: usize) -> Self {
        Self::with_ranking(batch_size, IntermediateRanking::Chained)
    }

    pub fn with_ranking(batch_size: usize, ranking: IntermediateRanking) -> Self {
        Self {
            batch_size: batch_size.max(1),
            ranking,
            memory: GoalVisibleMemory::new(),
        }
    }

    pub fn ranking(&self) -> IntermediateRanking {
        self.ranking
    }

    pub fn memory(&self) -> &GoalVisibleMemory<F, N> {
        &self.memory
    }

    /// Runs the tiers on an already drawn batch. Returns the index of the guide state.
    pub fn select_from_batch(
        &mut self,
        ctx: &SelectionContext<'_, F, N>,
        goal_state: &RealVectorState<F, N>,
        batch: &[RealVectorState<F, N>],
    ) -> usize {
        let goal_distances: Vec<F> = batch
            .iter()
            .map(|sample| ctx.oracle.distance(sample, goal_state))
            .collect();

        let visible: Vec<usize> = (0..batch.len())
            .filter(|&i| ctx.oracle.segment_valid(&batch[i], goal_state))
            .collect();
        if !visible.is_empty() {
            for &i in &visible {
                self.memory.push(batch[i], goal_distances[i]);
            }
            trace!("{} of {} samples see the goal", visible.len(), batch.len());
            return argmin_by_key(visible, |&i| goal_distances[i]).unwrap_or(0);
        }

        if !self.memory.is_empty() {
            let matches: Vec<(usize, IntermediateGoal<F, N>)> = batch
                .iter()
                .enumerate()
                .filter_map(|(i, sample)| {
                    self.memory
                        .first_visible_from(ctx.oracle, sample)
                        .map(|entry| (i, *entry))
                })
                .collect();
            if !matches.is_empty() {
                trace!(
                    "{} of {} samples see a remembered goal-visible state",
                    matches.len(),
                    batch.len()
                );
                let ranking = self.ranking;
                let best = argmin_by_key(matches, |(i, entry)| match ranking {
                    IntermediateRanking::ActualGoal => goal_distances[*i],
                    IntermediateRanking::Chained => {
                        ctx.oracle.distance(&batch[*i], &entry.state) + entry.distance_to_goal
                    }
                });
                if let Some((i, _)) = best {
                    return i;
                }
            }
        }

        argmin_by_key(0..batch.len(), |&i| goal_distances[i]).unwrap_or(0)
    }
}

impl<F: Float, const N: usize> SelectionStrategy<F, N> for VisibilitySelection<F, N> {
    fn select(&mut self, ctx: &mut SelectionContext<'_, F, N>) -> RealVectorState<F, N> {
        let goal_state = match ctx.goal.representative_state() {
            Some(state) => *state,
            None => {
                warn!(
                    "{}: the goal has no representative state, steering at a uniform sample",
                    self.name()
                );
                return ctx.sampler.sample();
            }
        };
        let batch = draw_batch(&mut *ctx.sampler, self.batch_size);
        let chosen = self.select_from_batch(ctx, &goal_state, &batch);
        batch[chosen]
    }

    fn reset(&mut self) {
        self.memory.clear();
    }

    fn name(&self) -> &'static str {
        match self.ranking {
            IntermediateRanking::ActualGoal => "VisibilityRRT",
            IntermediateRanking::Chained => "ChainedVisibilityRRT",
        }
    }

    fn goal_visible_memory(&self) -> Option<&GoalVisibleMemory<F, N>> {
        Some(&self.memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::{AnalyticValidityChecker, StaticRectangularObstacle};
    use crate::rrt::goal::{Goal, GoalState};
    use crate::rrt::oracle::VisibilityOracle;
    use crate::rrt::sampling::ReplayDistribution;
    use crate::rrt::space::EuclideanSpace;

    type State = RealVectorState<f64, 2>;

    fn s(x: f64, y: f64) -> State {
        RealVectorState::new([x, y])
    }

    /// A wall at x in [4, 6] covering y in [0, 7]; the goal sits at (10, 0) behind it.
    fn oracle() -> VisibilityOracle<f64, 2> {
        let space = EuclideanSpace::new([(0.0, 10.0), (0.0, 10.0)]).unwrap();
        let wall = StaticRectangularObstacle::new(s(4.0, 0.0), s(6.0, 7.0));
        let checker = AnalyticValidityChecker::new(vec![Box::new(wall)]);
        VisibilityOracle::new(Box::new(space), Box::new(checker))
    }

    fn run(
        selection: &mut VisibilitySelection<f64, 2>,
        oracle: &VisibilityOracle<f64, 2>,
        batch: Vec<State>,
    ) -> State {
        let goal = GoalState::new(s(10.0, 0.0), 0.1);
        let mut sampler = ReplayDistribution::new(batch).unwrap();
        let start = s(0.0, 0.0);
        let mut ctx = SelectionContext {
            oracle,
            goal: &goal,
            sampler: &mut sampler,
            reference_start: &start,
        };
        selection.select(&mut ctx)
    }

    #[test]
    fn single_goal_visible_sample_is_chosen() {
        let oracle = oracle();
        let mut selection = VisibilitySelection::new(4);
        // Only (8, 5) is on the goal side of the wall.
        let guide = run(
            &mut selection,
            &oracle,
            vec![s(1.0, 1.0), s(8.0, 5.0), s(2.0, 0.5), s(3.0, 3.0)],
        );
        assert_eq!(guide, s(8.0, 5.0));
        assert_eq!(selection.memory().len(), 1);
        assert_eq!(selection.memory().entries()[0].state, s(8.0, 5.0));
        assert!((selection.memory().entries()[0].distance_to_goal - 5.385164807134504).abs() < 1e-9);
    }

    #[test]
    fn closest_visible_sample_wins_and_all_are_remembered() {
        let oracle = oracle();
        let mut selection = VisibilitySelection::new(4);
        let guide = run(
            &mut selection,
            &oracle,
            vec![s(7.0, 8.0), s(1.0, 1.0), s(9.0, 2.0), s(8.0, 1.5)],
        );
        assert_eq!(guide, s(9.0, 2.0));
        let remembered: Vec<State> = selection.memory().entries().iter().map(|e| e.state).collect();
        assert_eq!(remembered, vec![s(7.0, 8.0), s(9.0, 2.0), s(8.0, 1.5)]);
    }

    #[test]
    fn falls_back_to_closest_sample_without_memory() {
        let oracle = oracle();
        let mut selection = VisibilitySelection::new(3);
        let guide = run(&mut selection, &oracle, vec![s(1.0, 1.0), s(3.0, 2.0), s(2.0, 6.0)]);
        assert_eq!(guide, s(3.0, 2.0));
        assert!(selection.memory().is_empty());
    }

    #[test]
    fn ties_go_to_the_first_sample() {
        let oracle = oracle();
        let mut selection = VisibilitySelection::new(2);
        // Both see the goal from the same distance.
        assert_eq!(run(&mut selection, &oracle, vec![s(8.0, 2.0), s(8.0, -2.0)]), s(8.0, 2.0));
        assert_eq!(run(&mut selection, &oracle, vec![s(8.0, -2.0), s(8.0, 2.0)]), s(8.0, -2.0));
        assert_eq!(selection.memory().len(), 4);

        // Both blocked, same distance, nothing in memory.
        let mut selection = VisibilitySelection::new(2);
        assert_eq!(run(&mut selection, &oracle, vec![s(1.0, 2.0), s(3.0, 6.0)]), s(1.0, 2.0));
        assert_eq!(run(&mut selection, &oracle, vec![s(3.0, 6.0), s(1.0, 2.0)]), s(3.0, 6.0));
    }

    // The intermediate tier ranks by distance to the actual goal, not to the remembered
    // state that was seen. The chained ranking is the alternative.
    #[test]
    fn intermediate_tier_ranks_by_actual_goal_distance() {
        let oracle = oracle();
        let mut plain = VisibilitySelection::new(1);
        let mut chained = VisibilitySelection::chained(1);
        // Remember (7, 9.5), which sees the goal past the wall.
        assert_eq!(run(&mut plain, &oracle, vec![s(7.0, 9.5)]), s(7.0, 9.5));
        assert_eq!(run(&mut chained, &oracle, vec![s(7.0, 9.5)]), s(7.0, 9.5));

        // Neither sample sees the goal; both see (7, 9.5). (3.5, 6.8) is closer to the goal,
        // (3, 9.8) is closer to the remembered state.
        plain.batch_size = 2;
        chained.batch_size = 2;
        let batch = vec![s(3.0, 9.8), s(3.5, 6.8)];
        assert_eq!(run(&mut plain, &oracle, batch.clone()), s(3.5, 6.8));
        assert_eq!(run(&mut chained, &oracle, batch), s(3.0, 9.8));
        assert_eq!(plain.memory().len(), 1);
    }

    #[test]
    fn single_intermediate_match_is_chosen() {
        let oracle = oracle();
        let mut selection = VisibilitySelection::new(1);
        run(&mut selection, &oracle, vec![s(7.0, 9.5)]);
        selection.batch_size = 3;
        // Only (1, 9) sees the remembered state; (3.9, 0.5) would win the plain fallback.
        let guide = run(
            &mut selection,
            &oracle,
            vec![s(3.9, 0.5), s(1.0, 9.0), s(3.5, 1.0)],
        );
        assert_eq!(guide, s(1.0, 9.0));
    }

    #[test]
    fn goal_checks_are_made_once_per_sample() {
        let oracle = oracle();
        let mut selection = VisibilitySelection::new(4);
        run(
            &mut selection,
            &oracle,
            vec![s(1.0, 1.0), s(8.0, 5.0), s(2.0, 0.5), s(3.0, 3.0)],
        );
        assert_eq!(oracle.segment_checks(), 4);

        let mut selection = VisibilitySelection::new(3);
        run(&mut selection, &oracle, vec![s(1.0, 1.0), s(3.0, 2.0), s(2.0, 6.0)]);
        assert_eq!(oracle.segment_checks(), 7);
    }

    #[test]
    fn memory_checks_stop_at_the_first_seen_state() {
        let oracle = oracle();
        let mut selection = VisibilitySelection::new(2);
        run(&mut selection, &oracle, vec![s(7.0, 9.5), s(8.0, 9.0)]);
        assert_eq!(selection.memory().len(), 2);
        let before = oracle.segment_checks();

        selection.batch_size = 3;
        // Three goal checks, then (3, 9.8) and (3.5, 6.8) stop at (7, 9.5) while
        // (3.9, 0.5) sees neither remembered state.
        let guide = run(
            &mut selection,
            &oracle,
            vec![s(3.0, 9.8), s(3.9, 0.5), s(3.5, 6.8)],
        );
        assert_eq!(oracle.segment_checks() - before, 3 + 1 + 2 + 1);
        assert_eq!(guide, s(3.5, 6.8));
    }

    /// A goal region with no single state standing for it.
    struct RightHalf;

    impl Goal<f64, 2> for RightHalf {
        fn is_satisfied(&self, state: &State) -> (bool, f64) {
            let gap = (9.0 - state[0]).max(0.0);
            (gap == 0.0, gap)
        }
    }

    #[test]
    fn goal_without_a_state_falls_back_to_a_uniform_sample() {
        let oracle = oracle();
        let mut selection = VisibilitySelection::new(3);
        let mut sampler = ReplayDistribution::new(vec![s(2.0, 2.0), s(9.5, 1.0)]).unwrap();
        let start = s(0.0, 0.0);
        let mut ctx = SelectionContext {
            oracle: &oracle,
            goal: &RightHalf,
            sampler: &mut sampler,
            reference_start: &start,
        };
        assert_eq!(selection.select(&mut ctx), s(2.0, 2.0));
        assert_eq!(oracle.segment_checks(), 0);
        assert!(selection.memory().is_empty());
    }

    #[test]
    fn reset_forgets_memory() {
        let oracle = oracle();
        let mut selection = VisibilitySelection::new(1);
        run(&mut selection, &oracle, vec![s(8.0, 1.0)]);
        assert_eq!(selection.memory().len(), 1);
        selection.reset();
        assert!(selection.memory().is_empty());
    }
}
