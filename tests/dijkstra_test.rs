use rand::{rngs::StdRng, Rng, SeedableRng};
use sewer_paths::{
    error::Error,
    graphs::{
        edge::DirectedWeightedEdge,
        graph_functions::{brute_force_distances, generate_test_cases, path_weight, validate_path},
        hash_graph::HashGraph,
        WeightedDigraph,
    },
    queue::scan_queue::ScanQueue,
    search::dijkstra::ShortestPaths,
};

fn get_lecture_graph() -> HashGraph<char> {
    let edges = [
        ('a', 'b', 9.0),
        ('a', 'c', 14.0),
        ('a', 'd', 15.0),
        ('b', 'e', 23.0),
        ('c', 'e', 17.0),
        ('c', 'd', 5.0),
        ('c', 'f', 30.0),
        ('d', 'f', 20.0),
        ('d', 'g', 37.0),
        ('e', 'f', 3.0),
        ('e', 'g', 20.0),
        ('f', 'g', 16.0),
    ];
    let edges: Vec<_> = edges
        .iter()
        .map(|&(tail, head, weight)| DirectedWeightedEdge::new(tail, head, weight).unwrap())
        .collect();
    HashGraph::from_edges(&edges)
}

fn get_random_graph(rng: &mut StdRng, number_of_vertices: u32, number_of_edges: u32) -> HashGraph<u32> {
    let mut graph = HashGraph::new();
    (0..number_of_vertices).for_each(|vertex| graph.add_vertex(vertex));
    for _ in 0..number_of_edges {
        let tail = rng.gen_range(0..number_of_vertices);
        let head = rng.gen_range(0..number_of_vertices);
        let weight = rng.gen_range(0..20) as f64;
        graph.set_edge(&DirectedWeightedEdge::new(tail, head, weight).unwrap());
    }
    graph
}

#[test]
fn lecture_notes() {
    let graph = get_lecture_graph();
    let mut paths = ShortestPaths::new(&graph);
    paths.single_source_distances('a').unwrap();

    assert_eq!(paths.get_distance(&'g'), Ok(50.0));
    let route: Vec<char> = paths
        .best_path(&'g')
        .unwrap()
        .iter()
        .map(|edge| graph.source(edge))
        .chain(['g'])
        .collect();
    assert_eq!(route, vec!['a', 'c', 'e', 'f', 'g']);

    for (vertex, distance) in [('a', 0.0), ('b', 9.0), ('c', 14.0), ('d', 15.0), ('e', 31.0), ('f', 34.0)] {
        assert_eq!(paths.get_distance(&vertex), Ok(distance));
    }
}

#[test]
fn path_to_source_is_empty() {
    let graph = get_lecture_graph();
    let mut paths = ShortestPaths::new(&graph);
    paths.single_source_distances('c').unwrap();

    assert_eq!(paths.best_path(&'c'), Ok(Vec::new()));
    assert!(matches!(paths.get_distance(&'a'), Err(Error::Unreachable { .. })));
    assert!(matches!(paths.best_path(&'b'), Err(Error::Unreachable { .. })));
}

#[test]
fn matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10 {
        let graph = get_random_graph(&mut rng, 40, 150);
        let source = rng.gen_range(0..40);
        let expected = brute_force_distances(&graph, graph.vertices(), &source);

        let mut heap_paths = ShortestPaths::new(&graph);
        heap_paths.single_source_distances(source).unwrap();
        let mut scan_paths = ShortestPaths::with_queue(&graph, ScanQueue::new());
        scan_paths.single_source_distances(source).unwrap();

        for vertex in graph.vertices() {
            let distance = expected.get(vertex).copied();
            assert_eq!(heap_paths.distance(vertex), distance);
            assert_eq!(scan_paths.distance(vertex), distance);

            if let Some(distance) = distance {
                let path = heap_paths.best_path(vertex).unwrap();
                assert_eq!(path_weight(&graph, &path), distance);
            }
        }
    }
}

#[test]
fn generated_test_cases_validate() {
    let mut rng = StdRng::seed_from_u64(3);
    let graph = get_random_graph(&mut rng, 30, 90);
    let test_cases = generate_test_cases(&graph, graph.vertices(), 5, 11);
    assert_eq!(test_cases.len(), 5 * 30);

    let mut paths = ShortestPaths::new(&graph);
    for test_case in &test_cases {
        let request = &test_case.request;
        if paths.source() != Some(&request.source) {
            paths.single_source_distances(request.source).unwrap();
        }
        let path = paths.best_path(&request.target).ok();
        assert_eq!(validate_path(&graph, test_case, path.as_deref()), Ok(()));
    }
}
