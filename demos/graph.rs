use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use wayfind::{
    AStarSearcher, BreadthFirstSearcher, GreedyBestFirstSearcher, NodeId, WeightedGraph,
};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Bfs,
    Gbfs,
    Astar,
}

/// Searches a lattice with random edge weights from one corner to the other.
#[derive(Parser)]
struct Options {
    #[arg(long, default_value_t = 5)]
    rows: usize,
    #[arg(long, default_value_t = 5)]
    cols: usize,
    /// Seed for the edge weights. Every weight is 1 if omitted.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_values_t = [Algorithm::Bfs, Algorithm::Gbfs, Algorithm::Astar])]
    algorithm: Vec<Algorithm>,
}

fn lattice(rows: usize, cols: usize, seed: Option<u64>) -> anyhow::Result<WeightedGraph> {
    let Some(seed) = seed else {
        return Ok(WeightedGraph::lattice(rows, cols, 1.0)?);
    };

    let mut rng = Pcg64::seed_from_u64(seed);
    let mut graph = WeightedGraph::new();
    let nodes: Vec<_> = (0..rows * cols).map(|_| graph.add_node()).collect();
    for i in 0..rows {
        for j in 0..cols {
            let node = nodes[i * cols + j];
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
                graph.add_edge(node, to, rng.gen_range(1.0..10.0))?;
            }
        }
    }
    Ok(graph)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Options::parse();
    if opt.rows == 0 || opt.cols == 0 {
        bail!("the lattice needs at least one row and one column");
    }

    let graph = lattice(opt.rows, opt.cols, opt.seed)?;
    let start = graph.node(0).context("empty graph")?;
    let goal = graph.node(graph.len() - 1).context("empty graph")?;
    let cols = opt.cols;
    let manhattan = move |a: NodeId, b: NodeId| {
        let (ar, ac) = (a.index() / cols, a.index() % cols);
        let (br, bc) = (b.index() / cols, b.index() % cols);
        (ar.abs_diff(br) + ac.abs_diff(bc)) as f64
    };

    for algorithm in opt.algorithm {
        let t1 = std::time::Instant::now();
        let (name, path) = match algorithm {
            Algorithm::Bfs => {
                let mut bfs = BreadthFirstSearcher::new();
                bfs.search(&graph, start, goal)?;
                ("bfs", bfs.path())
            }
            Algorithm::Gbfs => {
                let mut gbfs = GreedyBestFirstSearcher::new();
                gbfs.search(&graph, start, goal, manhattan)?;
                ("gbfs", gbfs.path())
            }
            Algorithm::Astar => {
                let mut astar = AStarSearcher::new();
                astar.search(&graph, start, goal, manhattan)?;
                ("astar", astar.path())
            }
        };
        let elapsed = t1.elapsed();

        match path {
            Some(path) => {
                println!(
                    "{name}: {} hops, cost {:.3}, {elapsed:.2?}",
                    path.hops(),
                    path.cost()
                );
            }
            None => println!("{name}: no path, {elapsed:.2?}"),
        }
    }
    Ok(())
}
