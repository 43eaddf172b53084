//! Visibility-guided rapidly-exploring random trees.
//!
//! A single-tree RRT that, every iteration, draws a small batch of samples and picks the
//! one most likely to lead to the goal: samples that can see the goal first, then
//! samples that can see a state known to see the goal, then simply the sample closest to
//! the goal. See [`rrt::Planner`] and [`rrt::selection`].

pub mod obstacles;
pub mod rrt;
pub mod util;
