use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;
use wayfind_core::{NodeId, WeightedGraph};
use wayfind_search::{zero_heuristic, AStarSearcher, BreadthFirstSearcher, GreedyBestFirstSearcher};

fn random_lattice(rng: &mut Pcg64, rows: usize, cols: usize) -> WeightedGraph {
    let mut graph = WeightedGraph::new();
    let nodes: Vec<_> = (0..rows * cols).map(|_| graph.add_node()).collect();
    for i in 0..rows {
        for j in 0..cols {
            let from = nodes[i * cols + j];
            let mut neighbors = vec![];
            if i > 0 {
                neighbors.push(nodes[(i - 1) * cols + j]);
            }
            if i + 1 < rows {
                neighbors.push(nodes[(i + 1) * cols + j]);
            }
            if j > 0 {
                neighbors.push(nodes[i * cols + j - 1]);
            }
            if j + 1 < cols {
                neighbors.push(nodes[i * cols + j + 1]);
            }
            for to in neighbors {
                graph.add_edge(from, to, rng.gen_range(1.0..10.0)).unwrap();
            }
        }
    }
    graph
}

fn random_sparse(rng: &mut Pcg64, nodes: usize, edges: usize) -> WeightedGraph {
    let mut graph = WeightedGraph::new();
    let ids: Vec<_> = (0..nodes).map(|_| graph.add_node()).collect();
    for _ in 0..edges {
        let from = ids[rng.gen_range(0..nodes)];
        let to = ids[rng.gen_range(0..nodes)];
        graph.add_edge(from, to, rng.gen_range(0.0..5.0)).unwrap();
    }
    graph
}

/// Cheapest cost from `start` to every node, by Bellman-Ford relaxation.
fn bellman_ford(graph: &WeightedGraph, start: NodeId) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; graph.len()];
    dist[start.index()] = 0.0;
    loop {
        let mut changed = false;
        for node in graph.nodes() {
            let d = dist[node.index()];
            if d.is_infinite() {
                continue;
            }
            for edge in graph.edges(node) {
                let candidate = d + edge.weight;
                if candidate < dist[edge.to.index()] {
                    dist[edge.to.index()] = candidate;
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

fn manhattan(cols: usize) -> impl Fn(NodeId, NodeId) -> f64 + Copy {
    move |a, b| {
        let (ar, ac) = (a.index() / cols, a.index() % cols);
        let (br, bc) = (b.index() / cols, b.index() % cols);
        (ar.abs_diff(br) + ac.abs_diff(bc)) as f64
    }
}

#[test]
fn astar_is_optimal_on_random_lattices() {
    let mut rng = Pcg64::seed_from_u64(0x5eed);
    let mut astar = AStarSearcher::new();
    for _ in 0..50 {
        let rows = rng.gen_range(5..12);
        let cols = rng.gen_range(5..12);
        let graph = random_lattice(&mut rng, rows, cols);
        let start = graph.node(rng.gen_range(0..graph.len())).unwrap();
        let goal = graph.node(rng.gen_range(0..graph.len())).unwrap();

        let expected = bellman_ford(&graph, start)[goal.index()];
        assert_eq!(astar.search(&graph, start, goal, manhattan(cols)), Ok(true));
        let path = astar.path().unwrap();
        assert!((path.cost() - expected).abs() < 1e-9);
        assert_eq!(path.start(), start);
        assert_eq!(path.end(), goal);
    }
}

#[test]
fn astar_matches_bfs_on_uniform_weights() {
    let mut rng = Pcg64::seed_from_u64(7);
    let mut astar = AStarSearcher::new();
    let mut bfs = BreadthFirstSearcher::new();
    for _ in 0..50 {
        let rows = rng.gen_range(1..10);
        let cols = rng.gen_range(1..10);
        let graph = WeightedGraph::lattice(rows, cols, 3.0).unwrap();
        let start = graph.node(rng.gen_range(0..graph.len())).unwrap();
        let goal = graph.node(rng.gen_range(0..graph.len())).unwrap();

        assert_eq!(astar.search(&graph, start, goal, zero_heuristic), Ok(true));
        assert_eq!(bfs.search(&graph, start, goal), Ok(true));
        let hops = bfs.path().unwrap().hops();
        assert_eq!(astar.path().unwrap().hops(), hops);
        assert_eq!(astar.path().unwrap().cost(), 3.0 * hops as f64);
    }
}

#[test]
fn all_searches_agree_on_reachability() {
    let mut rng = Pcg64::seed_from_u64(0xfeed);
    let mut astar = AStarSearcher::new();
    let mut bfs = BreadthFirstSearcher::new();
    let mut gbfs = GreedyBestFirstSearcher::new();
    for _ in 0..200 {
        let nodes = rng.gen_range(2..30);
        let edges = rng.gen_range(0..nodes * 2);
        let graph = random_sparse(&mut rng, nodes, edges);
        let start = graph.node(rng.gen_range(0..nodes)).unwrap();
        let goal = graph.node(rng.gen_range(0..nodes)).unwrap();

        let reachable = bellman_ford(&graph, start)[goal.index()].is_finite();
        assert_eq!(bfs.search(&graph, start, goal), Ok(reachable));
        assert_eq!(gbfs.search(&graph, start, goal, zero_heuristic), Ok(reachable));
        assert_eq!(astar.search(&graph, start, goal, zero_heuristic), Ok(reachable));
        if reachable {
            let gbfs_path = gbfs.path().unwrap();
            assert_eq!(gbfs_path.start(), start);
            assert_eq!(gbfs_path.end(), goal);
            assert!(gbfs_path.cost() >= astar.path().unwrap().cost() - 1e-9);
        }
    }
}

#[test]
fn concurrent_searches_match_sequential_ones() {
    let mut rng = Pcg64::seed_from_u64(0xc0c0);
    let graph = random_lattice(&mut rng, 12, 12);
    let pairs: Vec<_> = (0..32)
        .map(|_| {
            let start = graph.node(rng.gen_range(0..graph.len())).unwrap();
            let goal = graph.node(rng.gen_range(0..graph.len())).unwrap();
            (start, goal)
        })
        .collect();

    let expected: Vec<_> = pairs
        .iter()
        .map(|&(start, goal)| bellman_ford(&graph, start)[goal.index()])
        .collect();
    let found: Vec<_> = pairs
        .par_iter()
        .map_init(
            || (AStarSearcher::new(), BreadthFirstSearcher::new()),
            |(astar, bfs), &(start, goal)| {
                assert_eq!(bfs.search(&graph, start, goal), Ok(true));
                assert_eq!(astar.search(&graph, start, goal, manhattan(12)), Ok(true));
                astar.path().unwrap().cost()
            },
        )
        .collect();
    for (cost, expected) in found.into_iter().zip(expected) {
        assert!((cost - expected).abs() < 1e-9);
    }
}
