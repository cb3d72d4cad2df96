use std::{fmt::Debug, hash::Hash};

use ahash::{HashMap, HashMapExt};

use super::{edge::DirectedWeightedEdge, Distance, WeightedDigraph};

/// Adjacency-list graph over any hashable vertex type. Outgoing edges keep
/// their insertion order, so searches over it are reproducible.
#[derive(Clone, Debug)]
pub struct HashGraph<V> {
    out_edges: HashMap<V, Vec<DirectedWeightedEdge<V>>>,
    vertices: Vec<V>,
}

impl<V: Clone + Eq + Hash + Debug> Default for HashGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Eq + Hash + Debug> WeightedDigraph for HashGraph<V> {
    type Vertex = V;
    type Edge = DirectedWeightedEdge<V>;

    fn out_edges(&self, vertex: &V) -> Box<dyn Iterator<Item = DirectedWeightedEdge<V>> + '_> {
        match self.out_edges.get(vertex) {
            Some(edges) => Box::new(edges.iter().cloned()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn source(&self, edge: &DirectedWeightedEdge<V>) -> V {
        edge.tail().clone()
    }

    fn dest(&self, edge: &DirectedWeightedEdge<V>) -> V {
        edge.head().clone()
    }

    fn weight(&self, edge: &DirectedWeightedEdge<V>) -> Distance {
        edge.weight()
    }
}

impl<V: Clone + Eq + Hash + Debug> HashGraph<V> {
    pub fn new() -> Self {
        HashGraph {
            out_edges: HashMap::new(),
            vertices: Vec::new(),
        }
    }

    pub fn from_edges(edges: &[DirectedWeightedEdge<V>]) -> HashGraph<V> {
        let mut graph = HashGraph::new();
        edges.iter().for_each(|edge| {
            graph.set_edge(edge);
        });
        graph
    }

    /// Vertices in the order they were first mentioned.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.out_edges.values().map(Vec::len).sum()
    }

    pub fn add_vertex(&mut self, vertex: V) {
        if !self.out_edges.contains_key(&vertex) {
            self.out_edges.insert(vertex.clone(), Vec::new());
            self.vertices.push(vertex);
        }
    }

    /// Inserts the edge, or lowers the weight of an existing edge between the
    /// same pair of vertices if the new weight is smaller.
    pub fn set_edge(&mut self, edge: &DirectedWeightedEdge<V>) {
        self.add_vertex(edge.tail().clone());
        self.add_vertex(edge.head().clone());

        let Some(out_edges) = self.out_edges.get_mut(edge.tail()) else {
            return;
        };
        match out_edges
            .iter_mut()
            .find(|out_edge| out_edge.head() == edge.head())
        {
            Some(existing) => {
                if edge.weight() < existing.weight() {
                    *existing = edge.clone();
                }
            }
            None => out_edges.push(edge.clone()),
        }
    }

    pub fn set_edge_bidirectional(&mut self, edge: &DirectedWeightedEdge<V>) {
        self.set_edge(edge);
        self.set_edge(&edge.reversed());
    }
}

#[cfg(test)]
mod tests {
    use super::HashGraph;
    use crate::graphs::{edge::DirectedWeightedEdge, WeightedDigraph};

    #[test]
    fn keeps_lighter_parallel_edge() {
        let mut graph = HashGraph::new();
        graph.set_edge(&DirectedWeightedEdge::new(0, 1, 5.0).unwrap());
        graph.set_edge(&DirectedWeightedEdge::new(0, 1, 3.0).unwrap());
        graph.set_edge(&DirectedWeightedEdge::new(0, 1, 4.0).unwrap());

        let weights: Vec<_> = graph.out_edges(&0).map(|edge| edge.weight()).collect();
        assert_eq!(weights, vec![3.0]);
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.vertices(), &[0, 1]);
    }

    #[test]
    fn bidirectional_edges_share_weight() {
        let mut graph = HashGraph::new();
        graph.set_edge_bidirectional(&DirectedWeightedEdge::new("x", "y", 2.0).unwrap());

        assert_eq!(graph.out_edges(&"y").count(), 1);
        let back = graph.out_edges(&"y").next().unwrap();
        assert_eq!(graph.dest(&back), "x");
        assert_eq!(graph.weight(&back), 2.0);
    }

    #[test]
    fn rejects_negative_weight() {
        assert!(DirectedWeightedEdge::new(0, 1, -1.0).is_none());
        assert!(DirectedWeightedEdge::new(0, 1, f64::NAN).is_none());
    }
}
