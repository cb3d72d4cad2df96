use log::trace;

use super::collections::dijkstra_data::DijkstraData;
use crate::{
    error::{Error, Result},
    graphs::{Distance, WeightedDigraph},
    queue::{heap_queue::HeapQueue, PriorityQueue},
};

type Data<G> = DijkstraData<<G as WeightedDigraph>::Vertex, <G as WeightedDigraph>::Edge>;

/// Runs Dijkstra's algorithm from `source` over the whole reachable part of
/// `graph`.
///
/// Requires non-negative edge weights. A negative weight can make the search
/// try to lower the priority of an already settled vertex, which surfaces
/// as [`Error::NotFound`].
pub fn dijkstra_one_to_all<G, Q>(graph: &G, queue: &mut Q, source: G::Vertex) -> Result<Data<G>>
where
    G: WeightedDigraph + ?Sized,
    Q: PriorityQueue<G::Vertex>,
{
    queue.clear();
    let mut data = DijkstraData::new(source.clone());
    queue.add(source, 0.0)?;

    while !queue.is_empty() {
        let tail = queue.extract_min()?;
        let distance_tail = data
            .get_distance(&tail)
            .ok_or_else(|| Error::unreachable(&tail))?;

        for edge in graph.out_edges(&tail) {
            let head = graph.dest(&edge);
            let alternative_distance_head = distance_tail + graph.weight(&edge);
            match data.get_distance(&head) {
                None => {
                    data.update(head.clone(), alternative_distance_head, edge);
                    queue.add(head, alternative_distance_head)?;
                }
                Some(current_distance_head) if alternative_distance_head < current_distance_head => {
                    data.update(head.clone(), alternative_distance_head, edge);
                    queue.change_priority(&head, alternative_distance_head)?;
                }
                Some(_) => (),
            }
        }
    }

    trace!(
        "settled {} vertices from {:?}",
        data.number_of_reached_vertices(),
        data.source()
    );
    Ok(data)
}

/// Computes and remembers shortest paths through a weighted directed graph
/// with non-negative weights. Once paths are computed from a source vertex,
/// distances and best paths to arbitrary vertices can be queried.
///
/// Every call to [`single_source_distances`](Self::single_source_distances)
/// discards the previous results.
pub struct ShortestPaths<'a, G: WeightedDigraph + ?Sized, Q> {
    graph: &'a G,
    queue: Q,
    data: Option<Data<G>>,
}

impl<'a, G: WeightedDigraph + ?Sized> ShortestPaths<'a, G, HeapQueue<G::Vertex>> {
    pub fn new(graph: &'a G) -> Self {
        ShortestPaths::with_queue(graph, HeapQueue::new())
    }
}

impl<'a, G, Q> ShortestPaths<'a, G, Q>
where
    G: WeightedDigraph + ?Sized,
    Q: PriorityQueue<G::Vertex>,
{
    pub fn with_queue(graph: &'a G, queue: Q) -> Self {
        ShortestPaths {
            graph,
            queue,
            data: None,
        }
    }

    /// Computes the best paths from `source`, which can then be queried with
    /// [`get_distance`](Self::get_distance) and
    /// [`best_path`](Self::best_path).
    pub fn single_source_distances(&mut self, source: G::Vertex) -> Result<()> {
        self.data = None;
        self.data = Some(dijkstra_one_to_all(self.graph, &mut self.queue, source)?);
        Ok(())
    }

    /// The source of the most recent computation.
    pub fn source(&self) -> Option<&G::Vertex> {
        self.data.as_ref().map(DijkstraData::source)
    }

    pub fn is_reachable(&self, vertex: &G::Vertex) -> bool {
        self.distance(vertex).is_some()
    }

    pub fn distance(&self, vertex: &G::Vertex) -> Option<Distance> {
        self.data.as_ref()?.get_distance(vertex)
    }

    /// Returns the distance from the source to `vertex`. Fails with
    /// [`Error::Unreachable`] if the most recent computation never reached
    /// it, or if nothing was computed yet.
    pub fn get_distance(&self, vertex: &G::Vertex) -> Result<Distance> {
        self.distance(vertex)
            .ok_or_else(|| Error::unreachable(vertex))
    }

    /// Returns the edges of a best path from the source to `target`, in
    /// travel order. The path to the source itself is empty.
    pub fn best_path(&self, target: &G::Vertex) -> Result<Vec<G::Edge>> {
        self.data
            .as_ref()
            .and_then(|data| data.get_path(self.graph, target))
            .ok_or_else(|| Error::unreachable(target))
    }

    pub fn data(&self) -> Option<&Data<G>> {
        self.data.as_ref()
    }
}
