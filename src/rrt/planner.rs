use crate::rrt::config::{
    validate_batch_size, validate_goal_bias, validate_range, PlannerConfig,
};
use crate::rrt::error::PlannerError;
use crate::rrt::goal::Goal;
use crate::rrt::neighbors::{LinearNearestNeighbors, NearestNeighbors};
use crate::rrt::oracle::VisibilityOracle;
use crate::rrt::planner_data::PlannerData;
use crate::rrt::sampling::SamplingDistribution;
use crate::rrt::selection::{
    GoalVisibleMemory, SelectionContext, SelectionPolicy, SelectionStrategy,
};
use crate::rrt::solution::{SolutionPath, SolutionRecord, SolutionTracker};
use crate::rrt::space::StateSpace;
use crate::rrt::state::RealVectorState;
use crate::rrt::status::PlannerStatus;
use crate::rrt::termination::{MaxIterationsTermination, TerminationCondition};
use crate::rrt::tree::{MotionTree, Node};
use crate::rrt::validity_checker::ValidityChecker;
use log::{debug, error, info, warn};
use num_traits::Float;
use std::fmt::Debug;

/// Result of a single tree extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extension {
    /// The motion was free; holds the index of the last node added.
    Added(usize),
    /// The motion hit an obstacle and nothing was added.
    Rejected,
}

/// A single-tree RRT whose growth is guided by a pluggable [`SelectionStrategy`].
///
/// Template Parameters:
/// - `F`: The floating-point type.
/// - `N`: The dimension of the space.
/// - `NN`: The nearest neighbors data structure.
///
/// Each iteration asks the strategy for a guide state, finds the tree node nearest to it,
/// steers at most `range` towards it and adds the result if the straight motion is free.
/// The tree persists across calls to [`Planner::solve`] until [`Planner::clear`].
pub struct Planner<F, const N: usize, NN>
where
    F: Float + Debug + 'static,
    NN: NearestNeighbors<F, N>,
{
    config: PlannerConfig,
    oracle: VisibilityOracle<F, N>,
    sampler: Box<dyn SamplingDistribution<F, N>>,
    goal: Box<dyn Goal<F, N>>,
    strategy: Box<dyn SelectionStrategy<F, N>>,
    tree: MotionTree<F, N, NN>,
    /// Start states handed to the planner, consumed in order by `solve`.
    start_states: Vec<RealVectorState<F, N>>,
    next_start: usize,
    solution: SolutionTracker<F>,
    /// What the last solve reported, kept until the next solve or `clear`.
    last_solution: Option<SolutionRecord<F>>,
    /// The resolved extension length. Zero until resolved when `config.range` is auto.
    range: F,
}

impl<F, const N: usize, NN> Planner<F, N, NN>
where
    F: Float + Debug + 'static,
    NN: NearestNeighbors<F, N>,
{
    /// Constructs a new planner.
    ///
    /// Parameters:
    /// - `config`: Planner parameters, validated here.
    /// - `space`: Distance, interpolation and validity resolution.
    /// - `validity_checker`: Checks if states and edges are valid.
    /// - `sampler`: The uniform sampling distribution.
    /// - `goal`: The goal region.
    /// - `nearest_neighbors`: An empty nearest neighbors index for the tree. It must rank
    ///   with the same distance as `space`; [`Planner::with_linear_neighbors`] guarantees
    ///   this for any space.
    ///
    /// Fails if a parameter is out of range, or if the selection policy needs line of
    /// sight to the goal and the goal has no representative state.
    pub fn new(
        config: PlannerConfig,
        space: Box<dyn StateSpace<F, N>>,
        validity_checker: Box<dyn ValidityChecker<F, N>>,
        sampler: Box<dyn SamplingDistribution<F, N>>,
        goal: Box<dyn Goal<F, N>>,
        nearest_neighbors: NN,
    ) -> Result<Self, PlannerError> {
        config.validate()?;
        check_goal(config.policy, goal.as_ref())?;
        let range = to_float(config.range)?;
        let strategy = config
            .policy
            .build(config.batch_size, config.goal_bias, config.seed);
        Ok(Self {
            config,
            oracle: VisibilityOracle::new(space, validity_checker),
            sampler,
            goal,
            strategy,
            tree: MotionTree::new(nearest_neighbors),
            start_states: Vec::new(),
            next_start: 0,
            solution: SolutionTracker::new(),
            last_solution: None,
            range,
        })
    }

    /// Queues a start state. It enters the tree at the beginning of the next solve.
    pub fn add_start_state(&mut self, state: RealVectorState<F, N>) {
        self.start_states.push(state);
    }

    pub fn add_start_states<I: IntoIterator<Item = RealVectorState<F, N>>>(&mut self, states: I) {
        self.start_states.extend(states);
    }

    /// Grows the tree until the goal is satisfied or `termination` says to stop.
    ///
    /// The termination condition is polled before every iteration. Returns an exact
    /// status as soon as a node satisfies the goal, an approximate one with the closest
    /// node added during this solve otherwise, or a timeout if no node was added.
    ///
    /// Parameters:
    /// - `termination`: The termination condition.
    pub fn solve<T: TerminationCondition>(
        &mut self,
        termination: &mut T,
    ) -> Result<PlannerStatus<F>, PlannerError> {
        self.resolve_range();
        self.strategy.reset();
        self.solution.reset();
        self.last_solution = None;

        self.consume_start_states();
        if self.tree.is_empty() {
            error!("{}: There are no valid initial states!", self.name());
            return Err(PlannerError::InvalidStart);
        }

        info!(
            "{}: Starting planning with {} states already in datastructure",
            self.name(),
            self.tree.len()
        );

        while !self.solution.has_exact() {
            if termination.evaluate() {
                break;
            }
            self.iteration();
        }

        self.last_solution = self.solution.best();
        let status = match self.last_solution {
            Some(record) if !record.approximate => PlannerStatus::exact(record.gap),
            Some(record) => {
                warn!(
                    "{}: Found approximate solution with gap {:?}",
                    self.name(),
                    record.gap
                );
                PlannerStatus::approximate(record.gap)
            }
            None => PlannerStatus::timeout(),
        };

        info!("{}: Created {} states", self.name(), self.tree.len());
        Ok(status)
    }

    /// Runs at most `iterations` iterations. Stops early if a solution is found.
    pub fn run_iterations(&mut self, iterations: usize) -> Result<PlannerStatus<F>, PlannerError> {
        self.solve(&mut MaxIterationsTermination::new(iterations))
    }

    /// Drops the tree, the solution and the strategy's memory. Every start state given so
    /// far is queued again for the next solve.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.strategy.reset();
        self.solution.reset();
        self.last_solution = None;
        self.next_start = 0;
    }

    pub fn tree(&self) -> &MotionTree<F, N, NN> {
        &self.tree
    }

    pub fn oracle(&self) -> &VisibilityOracle<F, N> {
        &self.oracle
    }

    pub fn goal(&self) -> &dyn Goal<F, N> {
        self.goal.as_ref()
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The path to the node reported by the last solve.
    pub fn solution_path(&self) -> Option<SolutionPath<F, N>> {
        self.last_solution.map(|record| SolutionPath {
            states: self.tree.path_to(record.node),
            gap: record.gap,
            approximate: record.approximate,
        })
    }

    /// Exports the tree as a graph. Roots are start vertices and the node reported by the
    /// last solve is the goal vertex.
    pub fn planner_data(&self) -> PlannerData<F, N> {
        let mut data = PlannerData::new();
        for (index, node) in self.tree.nodes().iter().enumerate() {
            data.vertices.push(*node.state());
            match node.parent() {
                Some(parent) => data.edges.push((parent, index)),
                None => data.start_vertices.push(index),
            }
        }
        if let Some(record) = self.last_solution {
            data.goal_vertices.push(record.node);
        }
        data
    }

    /// The strategy's name, with `intermediate` appended when intermediate states are on.
    pub fn name(&self) -> String {
        if self.config.intermediate_states {
            format!("{}intermediate", self.strategy.name())
        } else {
            self.strategy.name().to_string()
        }
    }

    pub fn goal_visible_memory(&self) -> Option<&GoalVisibleMemory<F, N>> {
        self.strategy.goal_visible_memory()
    }

    /// The extension length. Zero means it will be picked from the space's extent when
    /// the next solve starts.
    pub fn range(&self) -> F {
        self.range
    }

    pub fn set_range(&mut self, range: f64) -> Result<(), PlannerError> {
        validate_range(range, false)?;
        self.range = to_float(range)?;
        self.config.range = range;
        Ok(())
    }

    pub fn goal_bias(&self) -> f64 {
        self.config.goal_bias
    }

    pub fn set_goal_bias(&mut self, goal_bias: f64) -> Result<(), PlannerError> {
        validate_goal_bias(goal_bias)?;
        self.config.goal_bias = goal_bias;
        self.rebuild_strategy();
        Ok(())
    }

    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    pub fn set_batch_size(&mut self, batch_size: usize) -> Result<(), PlannerError> {
        validate_batch_size(batch_size)?;
        self.config.batch_size = batch_size;
        self.rebuild_strategy();
        Ok(())
    }

    pub fn intermediate_states(&self) -> bool {
        self.config.intermediate_states
    }

    pub fn set_intermediate_states(&mut self, intermediate_states: bool) -> Result<(), PlannerError> {
        self.config.intermediate_states = intermediate_states;
        Ok(())
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        self.config.policy
    }

    pub fn set_selection_policy(&mut self, policy: SelectionPolicy) -> Result<(), PlannerError> {
        check_goal(policy, self.goal.as_ref())?;
        self.config.policy = policy;
        self.rebuild_strategy();
        Ok(())
    }

    /// Runs one iteration: pick a guide state, then extend the tree towards it.
    fn iteration(&mut self) -> Extension {
        let reference_start = match self.tree.nodes().first() {
            Some(node) => *node.state(),
            None => return Extension::Rejected,
        };
        let guide = {
            let mut ctx = SelectionContext {
                oracle: &self.oracle,
                goal: self.goal.as_ref(),
                sampler: self.sampler.as_mut(),
                reference_start: &reference_start,
            };
            self.strategy.select(&mut ctx)
        };
        self.extend(&guide)
    }

    /// Extends the tree from its node nearest to `guide`, by at most `range`.
    ///
    /// In intermediate mode the motion is discretised and every state along it becomes a
    /// node chained to the previous one. Only the last node of the chain is evaluated
    /// against the goal.
    pub fn extend(&mut self, guide: &RealVectorState<F, N>) -> Extension {
        let nearest = match self.tree.nearest(guide) {
            Some(index) => index,
            None => return Extension::Rejected,
        };
        let from = *self.tree.node(nearest).state();
        let target = self.oracle.steer(&from, guide, self.range);

        if !self.oracle.segment_valid(&from, &target) {
            return Extension::Rejected;
        }

        let last = if self.config.intermediate_states {
            self.oracle
                .expand(&from, &target)
                .into_iter()
                .skip(1)
                .fold(nearest, |parent, state| {
                    self.tree.add(Node::new(state, Some(parent)))
                })
        } else {
            self.tree.add(Node::new(target, Some(nearest)))
        };
        self.evaluate(last);
        Extension::Added(last)
    }

    /// Reports a node to the solution tracker.
    fn evaluate(&mut self, index: usize) {
        let state = *self.tree.node(index).state();
        let (satisfied, gap) = self.goal.is_satisfied(&state);
        if self.solution.record(index, satisfied, gap) {
            debug!("{}: node {} satisfies the goal", self.name(), index);
        }
    }

    /// Moves queued start states into the tree. Invalid ones are skipped. A start that
    /// already satisfies the goal is an exact solution.
    fn consume_start_states(&mut self) {
        while self.next_start < self.start_states.len() {
            let state = self.start_states[self.next_start];
            self.next_start += 1;
            if !self.oracle.is_state_valid(&state) {
                warn!("{}: Skipping invalid start state {:?}", self.name(), state);
                continue;
            }
            let index = self.tree.add(Node::new(state, None));
            let (satisfied, gap) = self.goal.is_satisfied(&state);
            if satisfied {
                self.solution.record(index, true, gap);
            }
        }
    }

    fn resolve_range(&mut self) {
        if self.range > F::zero() {
            return;
        }
        let fraction = F::from(PlannerConfig::AUTO_RANGE_FRACTION).unwrap_or_else(F::one);
        self.range = self.oracle.space().maximum_extent() * fraction;
        debug!("{}: range computed to be {:?}", self.name(), self.range);
    }

    fn rebuild_strategy(&mut self) {
        self.strategy = self.config.policy.build(
            self.config.batch_size,
            self.config.goal_bias,
            self.config.seed,
        );
    }
}

impl<F, const N: usize, S> Planner<F, N, LinearNearestNeighbors<F, N, S>>
where
    F: Float + Debug + 'static,
    S: StateSpace<F, N> + Clone + 'static,
{
    /// Constructs a planner whose nearest neighbor index scans the tree with the
    /// distance of `space`, the same one the oracle uses.
    pub fn with_linear_neighbors(
        config: PlannerConfig,
        space: S,
        validity_checker: Box<dyn ValidityChecker<F, N>>,
        sampler: Box<dyn SamplingDistribution<F, N>>,
        goal: Box<dyn Goal<F, N>>,
    ) -> Result<Self, PlannerError> {
        let nearest_neighbors = LinearNearestNeighbors::new(space.clone());
        Self::new(
            config,
            Box::new(space),
            validity_checker,
            sampler,
            goal,
            nearest_neighbors,
        )
    }
}

fn check_goal<F: Float, const N: usize>(
    policy: SelectionPolicy,
    goal: &dyn Goal<F, N>,
) -> Result<(), PlannerError> {
    if policy.requires_goal_state() && goal.representative_state().is_none() {
        return Err(PlannerError::GoalStateRequired(policy.as_str()));
    }
    Ok(())
}

fn to_float<F: Float>(value: f64) -> Result<F, PlannerError> {
    F::from(value).ok_or_else(|| {
        PlannerError::InvalidParameter(format!("{} does not fit the state's float type", value))
    })
}
