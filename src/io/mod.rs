//! Readers for the three CSV instance formats.
//!
//! | format     | files          | header skipped     | vertex count                        |
//! |------------|----------------|--------------------|-------------------------------------|
//! | toy        | edges          | yes                | largest id + 1                      |
//! | medium     | nodes + edges  | node file only     | from edge file name, e.g. `edges_25.csv` |
//! | real-world | nodes + edges  | both               | every node row                      |
//!
//! A blank line ends a file. Any malformed row fails the whole read; no partial graph is returned.

pub mod csv_reader;
pub mod medium;
pub mod real_world;
pub mod toy;

pub use csv_reader::RowReader;

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use crate::{
    errors::{Error, Result},
    graph::*,
};

/// Which distance an edge gets if both of its endpoints carry coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceSource {
    /// The weight column of the edge file
    #[default]
    EdgeWeight,
    /// Great-circle distance between the endpoints (falls back to the weight column)
    Haversine,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ReaderOptions {
    pub distance: DistanceSource,
}

impl ReaderOptions {
    fn add_edge(&self, graph: &mut Graph, u: Node, v: Node, weight: Weight) -> Result<()> {
        let weight = match (self.distance, graph.position_of(u), graph.position_of(v)) {
            (DistanceSource::Haversine, Some(a), Some(b)) => a.haversine_distance(&b),
            _ => weight,
        };
        graph.add_edge(u, v, weight)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFormat {
    Toy,
    Medium,
    RealWorld,
}

impl FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toy" => Ok(GraphFormat::Toy),
            "medium" => Ok(GraphFormat::Medium),
            "real-world" | "realworld" | "real_world" => Ok(GraphFormat::RealWorld),
            _ => Err(format!("unknown graph format {s:?}; expected toy, medium or real-world")),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GraphFormat::Toy => "toy",
            GraphFormat::Medium => "medium",
            GraphFormat::RealWorld => "real-world",
        })
    }
}

pub trait GraphCsvReader: Sized {
    fn try_read_toy<R: BufRead>(edges: R, options: &ReaderOptions) -> Result<Self>;
    fn try_read_toy_file<P: AsRef<Path>>(edges: P, options: &ReaderOptions) -> Result<Self>;

    fn try_read_medium<N: BufRead, E: BufRead>(
        nodes: N,
        edges: E,
        number_of_nodes: NumNodes,
        options: &ReaderOptions,
    ) -> Result<Self>;

    /// The number of vertices is taken from the name of the edge file
    fn try_read_medium_files<P: AsRef<Path>, Q: AsRef<Path>>(
        nodes: P,
        edges: Q,
        options: &ReaderOptions,
    ) -> Result<Self>;

    fn try_read_real_world<N: BufRead, E: BufRead>(
        nodes: N,
        edges: E,
        options: &ReaderOptions,
    ) -> Result<Self>;

    fn try_read_real_world_files<P: AsRef<Path>, Q: AsRef<Path>>(
        nodes: P,
        edges: Q,
        options: &ReaderOptions,
    ) -> Result<Self>;
}

fn open(path: &Path) -> Result<RowReader<BufReader<File>>> {
    Ok(RowReader::new(BufReader::new(File::open(path)?), path))
}

impl GraphCsvReader for Graph {
    fn try_read_toy<R: BufRead>(edges: R, options: &ReaderOptions) -> Result<Self> {
        toy::read(RowReader::new(edges, "<edges>"), options)
    }

    fn try_read_toy_file<P: AsRef<Path>>(edges: P, options: &ReaderOptions) -> Result<Self> {
        toy::read(open(edges.as_ref())?, options)
    }

    fn try_read_medium<N: BufRead, E: BufRead>(
        nodes: N,
        edges: E,
        number_of_nodes: NumNodes,
        options: &ReaderOptions,
    ) -> Result<Self> {
        medium::read(
            RowReader::new(nodes, "<nodes>"),
            RowReader::new(edges, "<edges>"),
            number_of_nodes,
            options,
        )
    }

    fn try_read_medium_files<P: AsRef<Path>, Q: AsRef<Path>>(
        nodes: P,
        edges: Q,
        options: &ReaderOptions,
    ) -> Result<Self> {
        let number_of_nodes = medium::number_of_nodes_from_file_name(edges.as_ref())?;
        medium::read(
            open(nodes.as_ref())?,
            open(edges.as_ref())?,
            number_of_nodes,
            options,
        )
    }

    fn try_read_real_world<N: BufRead, E: BufRead>(
        nodes: N,
        edges: E,
        options: &ReaderOptions,
    ) -> Result<Self> {
        real_world::read(
            RowReader::new(nodes, "<nodes>"),
            RowReader::new(edges, "<edges>"),
            options,
        )
    }

    fn try_read_real_world_files<P: AsRef<Path>, Q: AsRef<Path>>(
        nodes: P,
        edges: Q,
        options: &ReaderOptions,
    ) -> Result<Self> {
        real_world::read(open(nodes.as_ref())?, open(edges.as_ref())?, options)
    }
}

/// Reads a graph of the given format; `nodes` is required for all formats but toy
pub fn read_graph(
    format: GraphFormat,
    nodes: Option<&Path>,
    edges: &Path,
    options: &ReaderOptions,
) -> Result<Graph> {
    let require_nodes = || {
        nodes.ok_or_else(|| Error::malformed(edges, 0, format!("{format} graphs need a node file")))
    };

    let graph = match format {
        GraphFormat::Toy => Graph::try_read_toy_file(edges, options)?,
        GraphFormat::Medium => Graph::try_read_medium_files(require_nodes()?, edges, options)?,
        GraphFormat::RealWorld => {
            Graph::try_read_real_world_files(require_nodes()?, edges, options)?
        }
    };

    log::info!(
        "Read {format} graph with n={} m={}",
        graph.number_of_nodes(),
        graph.number_of_edges()
    );
    Ok(graph)
}
