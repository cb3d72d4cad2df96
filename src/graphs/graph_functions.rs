use ahash::{HashMap, HashMapExt};
use indicatif::ParallelProgressIterator;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;

use super::{Distance, WeightedDigraph};
use crate::{
    search::path::{ShortestPathRequest, ShortestPathTestCase},
    utility::get_progressbar,
};

/// Sum of the edge weights along `path`.
pub fn path_weight<G>(graph: &G, path: &[G::Edge]) -> Distance
where
    G: WeightedDigraph + ?Sized,
{
    path.iter().map(|edge| graph.weight(edge)).sum()
}

/// Check if a path is correct for a given test case.
pub fn validate_path<G>(
    graph: &G,
    test_case: &ShortestPathTestCase<G::Vertex>,
    path: Option<&[G::Edge]>,
) -> Result<(), String>
where
    G: WeightedDigraph + ?Sized,
{
    let request = &test_case.request;

    let Some(path) = path else {
        if test_case.distance.is_some() {
            return Err("no path is found but there should be one".to_string());
        }
        return Ok(());
    };

    let Some(distance) = test_case.distance else {
        return Err("a path was found where there should be none".to_string());
    };

    // Ensure that path is not empty when it should not be.
    if path.is_empty() && request.source != request.target {
        return Err("path is empty".to_string());
    }

    // Ensure fist and last vertex of path are source and target of request.
    if let Some(first_edge) = path.first() {
        if graph.source(first_edge) != request.source {
            return Err("first vertex of path is not source of request".to_string());
        }
    }
    if let Some(last_edge) = path.last() {
        if graph.dest(last_edge) != request.target {
            return Err("last vertex of path is not target of request".to_string());
        }
    }

    for window in path.windows(2) {
        let head = graph.dest(&window[0]);
        let tail = graph.source(&window[1]);
        if head != tail {
            return Err(format!("path breaks between {:?} and {:?}", head, tail));
        }
    }

    // check if every edge is part of the graph.
    for edge in path {
        let tail = graph.source(edge);
        let head = graph.dest(edge);
        let weight = graph.weight(edge);
        let exists = graph
            .out_edges(&tail)
            .any(|out_edge| graph.dest(&out_edge) == head && graph.weight(&out_edge) == weight);
        if !exists {
            return Err(format!("no edge between {:?} and {:?} found", tail, head));
        }
    }

    if path_weight(graph, path) != distance {
        return Err("wrong path weight".to_string());
    }

    Ok(())
}

/// Shortest distances from `source` by relaxing every edge until nothing
/// changes. Slow, but independent of any priority queue; used to cross-check
/// the Dijkstra implementation.
///
/// `vertices` must contain every vertex reachable from `source`.
pub fn brute_force_distances<G>(
    graph: &G,
    vertices: &[G::Vertex],
    source: &G::Vertex,
) -> HashMap<G::Vertex, Distance>
where
    G: WeightedDigraph + ?Sized,
{
    let mut distances = HashMap::new();
    distances.insert(source.clone(), 0.0);

    for _ in 0..vertices.len() {
        let mut changed = false;
        for vertex in vertices {
            let Some(distance_tail) = distances.get(vertex).copied() else {
                continue;
            };
            for edge in graph.out_edges(vertex) {
                let head = graph.dest(&edge);
                let alternative_distance_head = distance_tail + graph.weight(&edge);
                let improves = distances
                    .get(&head)
                    .map_or(true, |&current| alternative_distance_head < current);
                if improves {
                    distances.insert(head, alternative_distance_head);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    distances
}

/// Picks `number_of_sources` random sources and pairs each with every vertex,
/// with the expected distance taken from [`brute_force_distances`].
pub fn generate_test_cases<G>(
    graph: &G,
    vertices: &[G::Vertex],
    number_of_sources: usize,
    seed: u64,
) -> Vec<ShortestPathTestCase<G::Vertex>>
where
    G: WeightedDigraph + Sync + ?Sized,
    G::Vertex: Send + Sync,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let sources: Vec<G::Vertex> = vertices
        .choose_multiple(&mut rng, number_of_sources)
        .cloned()
        .collect();

    let pb = get_progressbar("Generating test cases", sources.len() as u64);
    let test_cases: Vec<Vec<_>> = sources
        .par_iter()
        .progress_with(pb)
        .map(|source| {
            let distances = brute_force_distances(graph, vertices, source);
            vertices
                .iter()
                .map(|target| ShortestPathTestCase {
                    request: ShortestPathRequest {
                        source: source.clone(),
                        target: target.clone(),
                    },
                    distance: distances.get(target).copied(),
                })
                .collect()
        })
        .collect();

    test_cases.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::{brute_force_distances, path_weight, validate_path};
    use crate::{
        graphs::{edge::DirectedWeightedEdge, hash_graph::HashGraph, WeightedDigraph},
        search::path::{ShortestPathRequest, ShortestPathTestCase},
    };

    fn triangle() -> HashGraph<char> {
        HashGraph::from_edges(&[
            DirectedWeightedEdge::new('a', 'b', 1.0).unwrap(),
            DirectedWeightedEdge::new('b', 'c', 1.0).unwrap(),
            DirectedWeightedEdge::new('a', 'c', 5.0).unwrap(),
        ])
    }

    fn test_case(distance: Option<f64>) -> ShortestPathTestCase<char> {
        ShortestPathTestCase {
            request: ShortestPathRequest {
                source: 'a',
                target: 'c',
            },
            distance,
        }
    }

    #[test]
    fn brute_force_finds_detour() {
        let graph = triangle();
        let distances = brute_force_distances(&graph, graph.vertices(), &'a');
        assert_eq!(distances.get(&'c'), Some(&2.0));

        let distances = brute_force_distances(&graph, graph.vertices(), &'c');
        assert_eq!(distances.len(), 1);
    }

    #[test]
    fn validates_paths() {
        let graph = triangle();
        let path: Vec<_> = graph
            .out_edges(&'a')
            .filter(|edge| *edge.head() == 'b')
            .chain(graph.out_edges(&'b'))
            .collect();
        assert_eq!(path_weight(&graph, &path), 2.0);

        assert_eq!(validate_path(&graph, &test_case(Some(2.0)), Some(path.as_slice())), Ok(()));
        assert!(validate_path(&graph, &test_case(Some(1.0)), Some(path.as_slice())).is_err());
        assert!(validate_path(&graph, &test_case(None), Some(path.as_slice())).is_err());
        assert!(validate_path(&graph, &test_case(Some(2.0)), None).is_err());
        assert_eq!(validate_path(&graph, &test_case(None), None), Ok(()));

        let broken = vec![path[1].clone()];
        assert!(validate_path(&graph, &test_case(Some(1.0)), Some(broken.as_slice())).is_err());
    }
}
