use crate::rrt::neighbors::NearestNeighbors;
use crate::rrt::state::RealVectorState;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A node in the motion tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node<F: Float, const N: usize> {
    /// The state in N-dimensional space.
    state: RealVectorState<F, N>,
    /// The index of the parent node (None if the node is a root).
    parent: Option<usize>,
}

impl<F: Float, const N: usize> Node<F, N> {
    /// Constructs a new node.
    /// Parameters:
    /// - `state`: The state in N-dimensional space.
    /// - `parent`: The index of the parent node (None if the node is a root).
    pub fn new(state: RealVectorState<F, N>, parent: Option<usize>) -> Self {
        Self { state, parent }
    }

    pub fn state(&self) -> &RealVectorState<F, N> {
        &self.state
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// The nodes of the growth tree, stored in insertion order, plus a nearest neighbor index
/// over their states.
///
/// A node's parent is always inserted before the node itself, so parent indices are
/// strictly smaller than child indices and the tree cannot contain cycles.
pub struct MotionTree<F: Float, const N: usize, NN: NearestNeighbors<F, N>> {
    nodes: Vec<Node<F, N>>,
    nearest_neighbors: NN,
}

impl<F: Float, const N: usize, NN: NearestNeighbors<F, N>> MotionTree<F, N, NN> {
    /// Creates an empty tree indexed by `nearest_neighbors`, which must be empty.
    pub fn new(mut nearest_neighbors: NN) -> Self {
        nearest_neighbors.clear();
        Self {
            nodes: Vec::new(),
            nearest_neighbors,
        }
    }

    /// Adds a node to the tree and the nearest neighbors index. Returns its index.
    pub fn add(&mut self, node: Node<F, N>) -> usize {
        let index = self.nodes.len();
        debug_assert!(
            node.parent.map_or(true, |parent| parent < index),
            "parent {:?} of node {} is not in the tree yet",
            node.parent,
            index
        );
        self.nearest_neighbors.add(node.state, index);
        self.nodes.push(node);
        index
    }

    /// Index of the node closest to `state`, or None if the tree is empty.
    pub fn nearest(&self, state: &RealVectorState<F, N>) -> Option<usize> {
        self.nearest_neighbors.nearest_one(state)
    }

    pub fn node(&self, index: usize) -> &Node<F, N> {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[Node<F, N>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node and empties the index.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nearest_neighbors.clear();
    }

    /// Returns the states from the root of `index`'s branch down to `index`.
    pub fn path_to(&self, index: usize) -> Vec<RealVectorState<F, N>> {
        let mut path = Vec::new();
        let mut current = Some(index);

        // Backtrack up the tree following the parent links.
        while let Some(i) = current {
            path.push(self.nodes[i].state);
            current = self.nodes[i].parent;
        }

        // Reverse the path so that it goes from the root to the node.
        path.reverse();
        path
    }

    /// Number of edges between `index` and its root.
    pub fn depth(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[index].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent].parent;
        }
        depth
    }
}
