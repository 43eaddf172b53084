#![allow(dead_code)]

use visibility_rrt::obstacles::{AnalyticValidityChecker, StaticRectangularObstacle};
use visibility_rrt::rrt::{
    EuclideanSpace, GoalState, KdTreeNearestNeighbors, Planner, PlannerConfig, RealVectorState,
    UniformDistribution,
};

pub type State = RealVectorState<f64, 2>;
pub type Planner2D = Planner<f64, 2, KdTreeNearestNeighbors<f64, 2>>;

pub const BOUNDS: [(f64, f64); 2] = [(0.0, 10.0), (0.0, 10.0)];

pub fn s(x: f64, y: f64) -> State {
    RealVectorState::new([x, y])
}

/// A thin wall at x in [4.8, 5.2] with a single opening for y in (6, 8).
pub fn wall_with_gap() -> AnalyticValidityChecker<f64, 2> {
    AnalyticValidityChecker::new(vec![
        Box::new(StaticRectangularObstacle::new(s(4.8, 0.0), s(5.2, 6.0))),
        Box::new(StaticRectangularObstacle::new(s(4.8, 8.0), s(5.2, 10.0))),
    ])
    .with_bounds(BOUNDS)
}

/// A thin wall at x in [4.8, 5.2] spanning the whole space.
pub fn closed_wall() -> AnalyticValidityChecker<f64, 2> {
    AnalyticValidityChecker::new(vec![Box::new(StaticRectangularObstacle::new(
        s(4.8, 0.0),
        s(5.2, 10.0),
    ))])
    .with_bounds(BOUNDS)
}

/// A seeded planner over [0, 10]^2 with the given checker, goal and configuration.
pub fn planner(
    config: PlannerConfig,
    checker: AnalyticValidityChecker<f64, 2>,
    goal: GoalState<f64, 2>,
    seed: u64,
) -> Planner2D {
    Planner::new(
        config,
        Box::new(EuclideanSpace::new(BOUNDS).unwrap()),
        Box::new(checker),
        Box::new(UniformDistribution::with_seed(BOUNDS, seed).unwrap()),
        Box::new(goal),
        KdTreeNearestNeighbors::new(),
    )
    .unwrap()
}

pub fn seeded_config(range: f64) -> PlannerConfig {
    PlannerConfig {
        range,
        seed: Some(7),
        ..PlannerConfig::default()
    }
}

/// Every node's parent was inserted before it.
pub fn parents_precede_children(planner: &Planner2D) -> bool {
    planner
        .tree()
        .nodes()
        .iter()
        .enumerate()
        .all(|(index, node)| node.parent().map_or(true, |parent| parent < index))
}
