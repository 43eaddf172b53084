mod common;

use common::*;
use visibility_rrt::rrt::{Goal, GoalState, MaxIterationsTermination, SelectionPolicy};

/// y at which the segment from `a` to `b` crosses x = 5, if it does.
fn crossing_height(a: &State, b: &State) -> Option<f64> {
    let (low, high) = if a[0] <= b[0] { (a, b) } else { (b, a) };
    if low[0] < 5.0 && high[0] > 5.0 {
        let t = (5.0 - low[0]) / (high[0] - low[0]);
        Some(low[1] + t * (high[1] - low[1]))
    } else {
        None
    }
}

fn solve_through_gap(policy: SelectionPolicy) {
    let config = visibility_rrt::rrt::PlannerConfig {
        policy,
        ..seeded_config(1.0)
    };
    let goal = GoalState::new(s(10.0, 10.0), 0.5);
    let mut planner = planner(config, wall_with_gap(), goal.clone(), 11);
    planner.add_start_state(s(0.0, 0.0));

    let status = planner
        .solve(&mut MaxIterationsTermination::new(20_000))
        .unwrap();
    assert!(status.is_exact(), "{:?} did not reach the goal", policy);
    assert!(parents_precede_children(&planner));

    let path = planner.solution_path().unwrap();
    assert!(!path.approximate);
    assert_eq!(path.states[0], s(0.0, 0.0));
    assert!(goal.is_satisfied(path.last().unwrap()).0);

    // Every path from the start to the goal has to pass through the opening.
    let crossings: Vec<f64> = path
        .states
        .windows(2)
        .filter_map(|pair| crossing_height(&pair[0], &pair[1]))
        .collect();
    assert!(!crossings.is_empty());
    assert!(crossings.iter().all(|&y| y > 6.0 && y < 8.0), "{:?}", crossings);

    let data = planner.planner_data();
    assert_eq!(data.vertex_count(), planner.tree().len());
    assert_eq!(data.edge_count(), planner.tree().len() - 1);
    assert_eq!(data.goal_vertices, vec![planner.tree().len() - 1]);
}

#[test]
fn visibility_policy_routes_through_the_gap() {
    solve_through_gap(SelectionPolicy::Visibility);
}

#[test]
fn chained_visibility_policy_routes_through_the_gap() {
    solve_through_gap(SelectionPolicy::ChainedVisibility);
}

#[test]
fn combined_distance_policy_routes_through_the_gap() {
    solve_through_gap(SelectionPolicy::CombinedDistance);
}

#[test]
fn memory_learns_states_that_see_the_goal_through_the_gap() {
    let goal = GoalState::new(s(10.0, 10.0), 0.5);
    let mut planner = planner(seeded_config(1.0), wall_with_gap(), goal, 3);
    planner.add_start_state(s(0.0, 0.0));
    planner.run_iterations(2_000).unwrap();

    let memory = planner.goal_visible_memory().unwrap();
    assert!(!memory.is_empty());
    // Left of the wall, only the opening gives line of sight to the goal.
    let through_gap: Vec<State> = memory
        .entries()
        .iter()
        .map(|entry| entry.state)
        .filter(|state| state[0] < 4.8)
        .collect();
    assert!(!through_gap.is_empty());
    for state in through_gap {
        let height = crossing_height(&state, &s(10.0, 10.0)).unwrap();
        assert!(height > 6.0 && height < 8.0);
    }
    for entry in memory.entries() {
        assert!((entry.distance_to_goal - entry.state.euclidean_distance(&s(10.0, 10.0))).abs() < 1e-9);
    }
}

#[test]
fn closed_wall_gives_the_closest_approach() {
    let goal = GoalState::new(s(9.0, 5.0), 0.5);
    let mut planner = planner(seeded_config(1.0), closed_wall(), goal.clone(), 5);
    planner.add_start_state(s(1.0, 5.0));
    let status = planner.run_iterations(500).unwrap();

    assert!(status.solved);
    assert!(status.approximate);
    // Nothing gets closer than the wall face at x = 4.8.
    assert!(status.gap >= 4.2 - 1e-9);

    let path = planner.solution_path().unwrap();
    assert!(path.approximate);
    assert_eq!(path.gap, status.gap);
    assert_eq!(goal.is_satisfied(path.last().unwrap()).1, status.gap);

    let closest = planner
        .tree()
        .nodes()
        .iter()
        .skip(1)
        .map(|node| goal.is_satisfied(node.state()).1)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(closest, status.gap);
}
