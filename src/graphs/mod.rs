use std::{fmt::Debug, hash::Hash};

pub mod edge;
pub mod graph_functions;
pub mod hash_graph;

/// Accumulated weight along a path. Edge weights are integers in every graph
/// this crate builds, and those are represented exactly.
pub type Distance = f64;

/// Read-only access to a weighted directed graph, for use in generic graph
/// algorithms.
///
/// Weights must be non-negative for any search in [`crate::search`]; a
/// negative weight violates that precondition and the results are
/// unspecified.
pub trait WeightedDigraph {
    type Vertex: Clone + Eq + Hash + Debug;
    type Edge: Clone + Debug;

    /// All outgoing edges of `vertex`. Unknown vertices have none.
    fn out_edges(&self, vertex: &Self::Vertex) -> Box<dyn Iterator<Item = Self::Edge> + '_>;

    /// The vertex an edge leaves from.
    fn source(&self, edge: &Self::Edge) -> Self::Vertex;

    /// The vertex an edge points to.
    fn dest(&self, edge: &Self::Edge) -> Self::Vertex;

    fn weight(&self, edge: &Self::Edge) -> Distance;
}
