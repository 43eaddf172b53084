use crate::rrt::space::StateSpace;
use crate::rrt::state::RealVectorState;
use kiddo::float::{distance::SquaredEuclidean, kdtree::Axis, kdtree::KdTree};
use num_traits::Float;
use std::marker::PhantomData;

/// A nearest neighbor index over tree states.
/// Stores RealVectorStates together with the index of the node that owns them.
///
/// The distance used for ranking is fixed when the index is constructed and never
/// changes afterwards.
pub trait NearestNeighbors<F: Float, const N: usize> {
    /// Adds a state to the index.
    ///
    /// Parameters:
    /// - `state`: The state to add.
    /// - `item`: The index of the node holding the state.
    fn add(&mut self, state: RealVectorState<F, N>, item: usize);

    /// Gets the item whose state is closest to `state`, or None if the index is empty.
    fn nearest_one(&self, state: &RealVectorState<F, N>) -> Option<usize> {
        self.nearest_k(state, 1).first().copied()
    }

    /// Gets the items of the k closest states, nearest first.
    fn nearest_k(&self, state: &RealVectorState<F, N>, k: usize) -> Vec<usize>;

    /// Number of states in the index.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every state from the index.
    fn clear(&mut self);
}

/// A nearest neighbor index that scans every stored state.
///
/// Ranks with the distance of an arbitrary [`StateSpace`], measured from the stored state
/// to the query, so it also works for asymmetric distances. Ties go to the state added
/// first.
pub struct LinearNearestNeighbors<F: Float, const N: usize, S: StateSpace<F, N>> {
    space: S,
    states: Vec<(RealVectorState<F, N>, usize)>,
    _phantom: PhantomData<F>,
}

impl<F: Float, const N: usize, S: StateSpace<F, N>> LinearNearestNeighbors<F, N, S> {
    pub fn new(space: S) -> Self {
        Self {
            space,
            states: Vec::new(),
            _phantom: PhantomData,
        }
    }

    fn ranked(&self, query: &RealVectorState<F, N>) -> Vec<(F, usize)> {
        self.states
            .iter()
            .map(|(state, item)| (self.space.distance(state, query), *item))
            .collect()
    }
}

impl<F: Float, const N: usize, S: StateSpace<F, N>> NearestNeighbors<F, N>
    for LinearNearestNeighbors<F, N, S>
{
    fn add(&mut self, state: RealVectorState<F, N>, item: usize) {
        self.states.push((state, item));
    }

    fn nearest_one(&self, state: &RealVectorState<F, N>) -> Option<usize> {
        let mut best: Option<(F, usize)> = None;
        for (distance, item) in self.ranked(state) {
            match best {
                Some((best_distance, _)) if !(distance < best_distance) => {}
                _ => best = Some((distance, item)),
            }
        }
        best.map(|(_, item)| item)
    }

    fn nearest_k(&self, state: &RealVectorState<F, N>, k: usize) -> Vec<usize> {
        let mut ranked = self.ranked(state);
        // Stable sort keeps insertion order among equal distances.
        ranked.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.into_iter().take(k).map(|(_, item)| item).collect()
    }

    fn len(&self) -> usize {
        self.states.len()
    }

    fn clear(&mut self) {
        self.states.clear();
    }
}

/// A kd-tree index (kiddo) ranking by Euclidean distance.
pub struct KdTreeNearestNeighbors<F: Float + Axis, const N: usize> {
    kdtree: KdTree<F, usize, N, 32, u32>,
    len: usize,
}

impl<F: Float + Axis, const N: usize> KdTreeNearestNeighbors<F, N> {
    pub fn new() -> Self {
        Self {
            kdtree: KdTree::new(),
            len: 0,
        }
    }
}

impl<F: Float + Axis, const N: usize> Default for KdTreeNearestNeighbors<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float + Axis, const N: usize> NearestNeighbors<F, N> for KdTreeNearestNeighbors<F, N> {
    fn add(&mut self, state: RealVectorState<F, N>, item: usize) {
        self.kdtree.add(state.values(), item);
        self.len += 1;
    }

    fn nearest_one(&self, state: &RealVectorState<F, N>) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let neighbor = self.kdtree.nearest_one::<SquaredEuclidean>(state.values());
        Some(neighbor.item)
    }

    fn nearest_k(&self, state: &RealVectorState<F, N>, k: usize) -> Vec<usize> {
        if self.len == 0 {
            return Vec::new();
        }
        self.kdtree
            .nearest_n::<SquaredEuclidean>(state.values(), k)
            .iter()
            .map(|n| n.item)
            .collect()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        // kiddo cannot remove every item at once.
        self.kdtree = KdTree::new();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rrt::space::EuclideanSpace;

    fn space() -> EuclideanSpace<f64, 2> {
        EuclideanSpace::new([(0.0, 10.0), (0.0, 10.0)]).unwrap()
    }

    fn fill<NN: NearestNeighbors<f64, 2>>(nn: &mut NN) {
        nn.add(RealVectorState::new([0.0, 0.0]), 0);
        nn.add(RealVectorState::new([5.0, 5.0]), 1);
        nn.add(RealVectorState::new([9.0, 1.0]), 2);
    }

    #[test]
    fn linear_and_kdtree_agree() {
        let mut linear = LinearNearestNeighbors::new(space());
        let mut kdtree = KdTreeNearestNeighbors::new();
        fill(&mut linear);
        fill(&mut kdtree);

        let query = RealVectorState::new([6.0, 4.0]);
        assert_eq!(linear.nearest_one(&query), Some(1));
        assert_eq!(kdtree.nearest_one(&query), Some(1));
        assert_eq!(linear.nearest_k(&query, 2), vec![1, 2]);
        assert_eq!(kdtree.nearest_k(&query, 2), vec![1, 2]);
    }

    #[test]
    fn empty_index_has_no_nearest() {
        let linear = LinearNearestNeighbors::new(space());
        let kdtree = KdTreeNearestNeighbors::<f64, 2>::new();
        let query = RealVectorState::new([1.0, 1.0]);
        assert_eq!(linear.nearest_one(&query), None);
        assert_eq!(kdtree.nearest_one(&query), None);
    }

    #[test]
    fn linear_ties_go_to_first_added() {
        let mut linear = LinearNearestNeighbors::new(space());
        linear.add(RealVectorState::new([1.0, 0.0]), 7);
        linear.add(RealVectorState::new([-1.0, 0.0]), 3);
        assert_eq!(linear.nearest_one(&RealVectorState::new([0.0, 0.0])), Some(7));
    }

    #[test]
    fn clear_empties_both() {
        let mut linear = LinearNearestNeighbors::new(space());
        let mut kdtree = KdTreeNearestNeighbors::new();
        fill(&mut linear);
        fill(&mut kdtree);
        linear.clear();
        kdtree.clear();
        assert!(linear.is_empty());
        assert!(kdtree.is_empty());
        assert_eq!(kdtree.nearest_one(&RealVectorState::new([0.0, 0.0])), None);
    }
}
