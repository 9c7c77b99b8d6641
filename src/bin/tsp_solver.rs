use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context;
use itertools::Itertools;
use log::LevelFilter;
use serde::Serialize;
use structopt::StructOpt;
use tsp::{
    graph::{GraphEdgeOrder, GraphNodeOrder, Node, NumNodes},
    io::{DistanceSource, GraphFormat, ReaderOptions, read_graph},
    log::build_logger_for_verbosity,
    solver::{Algorithm, Solution, SolverConfig, solve},
    utils::signal_handling,
};

#[derive(StructOpt)]
#[structopt(name = "tsp", about = "Computes travelling salesman tours over CSV graphs")]
struct Opts {
    /// Input format: toy, medium or real-world
    #[structopt(short, long, default_value = "toy")]
    format: GraphFormat,

    /// Edge file
    #[structopt(short, long, parse(from_os_str))]
    edges: PathBuf,

    /// Node file (medium and real-world only)
    #[structopt(short, long, parse(from_os_str))]
    nodes: Option<PathBuf>,

    /// backtracking, held-karp, double-tree, nearest-neighbour, christofides or real-world
    #[structopt(short, long, default_value = "backtracking")]
    algorithm: Algorithm,

    #[structopt(short, long, default_value = "0")]
    start: Node,

    /// Timeout in seconds for the exact algorithms
    #[structopt(short = "T", long)]
    timeout: Option<f64>,

    /// Recompute edge weights from coordinates where available
    #[structopt(long)]
    haversine: bool,

    #[structopt(long, default_value = "20")]
    held_karp_max_nodes: NumNodes,

    /// Print the result as JSON
    #[structopt(long)]
    json: bool,

    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    algorithm: Algorithm,
    number_of_nodes: NumNodes,
    seconds: f64,
    solution: &'a Solution,
}

fn main() -> anyhow::Result<()> {
    signal_handling::initialize();

    let opts = Opts::from_args();
    build_logger_for_verbosity(LevelFilter::Info, opts.verbose);

    let options = ReaderOptions {
        distance: if opts.haversine {
            DistanceSource::Haversine
        } else {
            DistanceSource::EdgeWeight
        },
    };

    let graph = read_graph(opts.format, opts.nodes.as_deref(), &opts.edges, &options)
        .with_context(|| {
            format!("Cannot read {} graph from {}", opts.format, opts.edges.display())
        })?;

    let timeout = opts
        .timeout
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("Invalid timeout")?;

    let config = SolverConfig {
        start: opts.start,
        held_karp_max_nodes: opts.held_karp_max_nodes,
        timeout,
        ..Default::default()
    };

    let start = Instant::now();
    let solution = solve(&graph, opts.algorithm, &config)
        .with_context(|| format!("{} failed", opts.algorithm))?;
    let seconds = start.elapsed().as_secs_f64();

    if opts.json {
        let report = Report {
            algorithm: opts.algorithm,
            number_of_nodes: graph.number_of_nodes(),
            seconds,
            solution: &solution,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let tour = solution.tour();
    println!("algorithm: {}", opts.algorithm);
    println!("vertices:  {} ({} edges)", graph.number_of_nodes(), graph.number_of_edges());
    println!("length:    {:.3}", tour.length);
    println!("time:      {seconds:.3}s");
    println!("tour:      {}", tour.order.iter().join(" -> "));

    if let Solution::RealWorld(result) = &solution {
        println!(
            "synthetic: {} legs ({} unpriced)",
            result.synthetic_edges.len(),
            result.unpriced_jumps
        );
    }

    Ok(())
}
