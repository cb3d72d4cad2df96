use std::hash::Hash;

use ahash::{HashMap, HashMapExt};

use crate::graphs::{Distance, WeightedDigraph};

/// Distances and predecessor edges recorded by one single-source search.
///
/// A vertex is reached iff it has a distance. The source has distance zero
/// and no predecessor; every other reached vertex has the last edge of a
/// shortest path to it.
#[derive(Clone, Debug)]
pub struct DijkstraData<V, E> {
    source: V,
    distances: HashMap<V, Distance>,
    predecessors: HashMap<V, E>,
}

impl<V: Clone + Eq + Hash, E: Clone> DijkstraData<V, E> {
    pub fn new(source: V) -> Self {
        let mut distances = HashMap::new();
        distances.insert(source.clone(), 0.0);
        DijkstraData {
            source,
            distances,
            predecessors: HashMap::new(),
        }
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    /// Retrieves the distance to a given vertex, if it was reached.
    pub fn get_distance(&self, vertex: &V) -> Option<Distance> {
        self.distances.get(vertex).copied()
    }

    /// Retrieves the edge a shortest path enters `vertex` with.
    pub fn get_predecessor(&self, vertex: &V) -> Option<&E> {
        self.predecessors.get(vertex)
    }

    /// Records `distance` for `vertex`, reached through `predecessor`.
    pub fn update(&mut self, vertex: V, distance: Distance, predecessor: E) {
        self.distances.insert(vertex.clone(), distance);
        self.predecessors.insert(vertex, predecessor);
    }

    pub fn number_of_reached_vertices(&self) -> usize {
        self.distances.len()
    }

    /// Constructs the edges of a shortest path from the source to `target`,
    /// in travel order. Returns `None` if `target` was not reached.
    pub fn get_path<G>(&self, graph: &G, target: &V) -> Option<Vec<E>>
    where
        G: WeightedDigraph<Vertex = V, Edge = E> + ?Sized,
    {
        self.distances.get(target)?;

        let mut edges = Vec::new();
        let mut vertex = target.clone();
        while let Some(edge) = self.predecessors.get(&vertex) {
            // A chain longer than the number of predecessors means a cycle,
            // which only a negative weight can produce.
            if edges.len() >= self.predecessors.len() {
                return None;
            }
            vertex = graph.source(edge);
            edges.push(edge.clone());
        }

        // Trace ran backwards; reverse it to start from the source.
        edges.reverse();
        Some(edges)
    }
}
