use clap::Parser;
use std::fs;
use std::time::Duration;
use visibility_rrt::obstacles::{AnalyticValidityChecker, StaticRectangularObstacle};
use visibility_rrt::rrt::{
    AnyTermination, EuclideanSpace, GoalState, KdTreeNearestNeighbors, MaxIterationsTermination,
    MaxTimeTermination, Planner, PlannerConfig, RealVectorState, SelectionPolicy,
    UniformDistribution,
};

#[derive(Parser, Debug)]
#[command(version, about = "Plan through a wall with a single opening", long_about = None)]
struct CliArgs {
    /// JSON planner configuration. Command line options override it.
    #[arg(short, long)]
    config: Option<String>,

    /// Selection policy: visibility, chained_visibility or combined_distance
    #[arg(short, long)]
    policy: Option<SelectionPolicy>,

    /// Maximum extension length (0 picks one from the space size)
    #[arg(short, long)]
    range: Option<f64>,

    /// Add every discretised state along an extension
    #[arg(short, long)]
    intermediate_states: bool,

    /// Seed for sampling
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Iteration budget
    #[arg(long, default_value_t = 20_000)]
    max_iterations: usize,

    /// Time budget in seconds
    #[arg(long, default_value_t = 10.0)]
    max_seconds: f64,

    /// File to write the planner data to, as JSON
    #[arg(short, long)]
    output: Option<String>,
}

const BOUNDS: [(f64, f64); 2] = [(0.0, 32.0), (0.0, 32.0)];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => PlannerConfig::from_file(path).expect("Failed to load the configuration"),
        None => PlannerConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Some(range) = args.range {
        config.range = range;
    }
    config.intermediate_states |= args.intermediate_states;
    if config.seed.is_none() {
        config.seed = Some(args.seed);
    }

    // A wall across the middle of the space, open for y in (20, 24).
    let checker = AnalyticValidityChecker::new(vec![
        Box::new(StaticRectangularObstacle::new(
            RealVectorState::new([15.0, 0.0]),
            RealVectorState::new([17.0, 20.0]),
        )),
        Box::new(StaticRectangularObstacle::new(
            RealVectorState::new([15.0, 24.0]),
            RealVectorState::new([17.0, 32.0]),
        )),
    ])
    .with_bounds(BOUNDS);

    let mut planner: Planner<f64, 2, KdTreeNearestNeighbors<f64, 2>> = Planner::new(
        config,
        Box::new(EuclideanSpace::new(BOUNDS).expect("Invalid bounds")),
        Box::new(checker),
        Box::new(UniformDistribution::with_seed(BOUNDS, args.seed).expect("Invalid bounds")),
        Box::new(GoalState::new(RealVectorState::new([30.0, 30.0]), 1.0)),
        KdTreeNearestNeighbors::new(),
    )
    .expect("Failed to set up the planner");
    planner.add_start_state(RealVectorState::new([2.0, 2.0]));

    let mut termination = AnyTermination::new(vec![
        Box::new(MaxIterationsTermination::new(args.max_iterations)),
        Box::new(MaxTimeTermination::new(Duration::from_secs_f64(args.max_seconds))),
    ]);
    let status = planner
        .solve(&mut termination)
        .expect("Planning failed");

    println!("{}: {} (gap {:.3})", planner.name(), status, status.gap);
    if let Some(path) = planner.solution_path() {
        println!(
            "Path of {} states, length {:.3}",
            path.states.len(),
            path.length(planner.oracle().space())
        );
    }
    if let Some(memory) = planner.goal_visible_memory() {
        println!("{} goal-visible states remembered", memory.len());
    }
    println!("{} segment checks", planner.oracle().segment_checks());

    if let Some(output) = &args.output {
        fs::write(output, planner.planner_data().to_json().pretty(2))
            .expect("Failed to write the planner data");
    }
}
