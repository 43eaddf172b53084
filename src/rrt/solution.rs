use crate::rrt::space::StateSpace;
use crate::rrt::state::RealVectorState;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// The node currently standing as the answer of a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionRecord<F: Float> {
    /// Index of the node in the motion tree.
    pub node: usize,
    /// Residual distance to the goal from that node.
    pub gap: F,
    /// True if the node does not satisfy the goal.
    pub approximate: bool,
}

/// Tracks the exact solution, or the closest approach to the goal, over one solve.
///
/// Nodes are reported in insertion order. The first node that satisfies the goal ends
/// the search; until then the node with the strictly smallest gap is kept, so ties go
/// to the node inserted first.
#[derive(Debug, Clone)]
pub struct SolutionTracker<F: Float> {
    exact: Option<usize>,
    approximate: Option<usize>,
    approximate_gap: F,
    exact_gap: F,
}

impl<F: Float> SolutionTracker<F> {
    pub fn new() -> Self {
        Self {
            exact: None,
            approximate: None,
            approximate_gap: F::infinity(),
            exact_gap: F::infinity(),
        }
    }

    /// Forgets every recorded node.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Records the goal test of a newly inserted node. Returns true if the node is an
    /// exact solution.
    pub fn record(&mut self, node: usize, satisfied: bool, gap: F) -> bool {
        if self.exact.is_some() {
            return true;
        }
        if satisfied {
            self.exact = Some(node);
            self.exact_gap = gap;
            return true;
        }
        if gap < self.approximate_gap {
            self.approximate = Some(node);
            self.approximate_gap = gap;
        }
        false
    }

    pub fn has_exact(&self) -> bool {
        self.exact.is_some()
    }

    /// The smallest gap seen so far among nodes that do not satisfy the goal.
    pub fn approximate_gap(&self) -> F {
        self.approximate_gap
    }

    /// The exact solution if one was found, else the closest approach.
    pub fn best(&self) -> Option<SolutionRecord<F>> {
        if let Some(node) = self.exact {
            return Some(SolutionRecord {
                node,
                gap: self.exact_gap,
                approximate: false,
            });
        }
        self.approximate.map(|node| SolutionRecord {
            node,
            gap: self.approximate_gap,
            approximate: true,
        })
    }
}

impl<F: Float> Default for SolutionTracker<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// The states from a root of the tree to the solution node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionPath<F: Float, const N: usize> {
    /// Root first, solution node last.
    pub states: Vec<RealVectorState<F, N>>,
    /// Residual distance to the goal from the last state.
    pub gap: F,
    pub approximate: bool,
}

impl<F: Float, const N: usize> SolutionPath<F, N> {
    /// Sum of the distances between consecutive states, measured in `space`.
    pub fn length(&self, space: &dyn StateSpace<F, N>) -> F {
        self.states
            .windows(2)
            .fold(F::zero(), |total, pair| total + space.distance(&pair[0], &pair[1]))
    }

    pub fn last(&self) -> Option<&RealVectorState<F, N>> {
        self.states.last()
    }
}
