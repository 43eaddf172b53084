use crate::rrt::state::RealVectorState;
use json::JsonValue;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A read-only snapshot of the planner's tree as a graph.
///
/// Vertex ids are node indices, so every `start_vertices`, `goal_vertices` and edge entry
/// indexes into `vertices`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerData<F: Float, const N: usize> {
    pub vertices: Vec<RealVectorState<F, N>>,
    /// Nodes without a parent.
    pub start_vertices: Vec<usize>,
    /// The node reported by the last solve, if any.
    pub goal_vertices: Vec<usize>,
    /// `(parent, child)` pairs.
    pub edges: Vec<(usize, usize)>,
}

impl<F: Float, const N: usize> PlannerData<F, N> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            start_vertices: Vec::new(),
            goal_vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Serializes the graph to a JSON object with `vertices`, `start_vertices`,
    /// `goal_vertices` and `edges` arrays.
    pub fn to_json(&self) -> JsonValue {
        let mut vertices = JsonValue::new_array();
        for vertex in &self.vertices {
            push(&mut vertices, real_vector_to_json_array(vertex));
        }
        let mut edges = JsonValue::new_array();
        for &(parent, child) in &self.edges {
            push(&mut edges, json::array![parent, child]);
        }
        json::object! {
            vertices: vertices,
            start_vertices: index_array(&self.start_vertices),
            goal_vertices: index_array(&self.goal_vertices),
            edges: edges,
        }
    }
}

impl<F: Float, const N: usize> Default for PlannerData<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a state to a JSON array of numbers. Components that do not fit an f64
/// become null.
pub fn real_vector_to_json_array<F: Float, const N: usize>(
    real_vector: &RealVectorState<F, N>,
) -> JsonValue {
    let mut array = JsonValue::new_array();
    for i in 0..N {
        let value = match real_vector[i].to_f64() {
            Some(value) => JsonValue::Number(value.into()),
            None => JsonValue::Null,
        };
        push(&mut array, value);
    }
    array
}

fn index_array(indices: &[usize]) -> JsonValue {
    let mut array = JsonValue::new_array();
    for &index in indices {
        push(&mut array, index.into());
    }
    array
}

// Only fails on non-array values.
fn push(array: &mut JsonValue, value: JsonValue) {
    if let Err(err) = array.push(value) {
        log::error!("failed to extend JSON array: {}", err);
    }
}
