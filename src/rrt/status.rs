use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a call to [`crate::rrt::Planner::solve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerStatus<F: Float> {
    /// True if some node was reported, exact or approximate.
    pub solved: bool,
    /// True if the reported node does not satisfy the goal.
    pub approximate: bool,
    /// Residual distance to the goal from the reported node. Infinite when unsolved.
    pub gap: F,
}

impl<F: Float> PlannerStatus<F> {
    pub fn exact(gap: F) -> Self {
        Self {
            solved: true,
            approximate: false,
            gap,
        }
    }

    pub fn approximate(gap: F) -> Self {
        Self {
            solved: true,
            approximate: true,
            gap,
        }
    }

    pub fn timeout() -> Self {
        Self {
            solved: false,
            approximate: false,
            gap: F::infinity(),
        }
    }

    /// True only for a solution that satisfies the goal.
    pub fn is_exact(&self) -> bool {
        self.solved && !self.approximate
    }
}

impl<F: Float> fmt::Display for PlannerStatus<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match (self.solved, self.approximate) {
            (true, false) => "Exact solution",
            (true, true) => "Approximate solution",
            (false, _) => "Timeout",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_outcome() {
        assert_eq!(PlannerStatus::exact(0.0_f64).to_string(), "Exact solution");
        assert_eq!(PlannerStatus::approximate(1.5_f64).to_string(), "Approximate solution");
        let timeout = PlannerStatus::<f64>::timeout();
        assert_eq!(timeout.to_string(), "Timeout");
        assert!(!timeout.is_exact());
        assert!(timeout.gap.is_infinite());
    }
}
