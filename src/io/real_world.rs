use std::io::BufRead;

use super::{ReaderOptions, RowReader};
use crate::{errors::Result, graph::*};

/// Both files carry a header; every row has to be well-formed
pub(super) fn read<N: BufRead, E: BufRead>(
    mut nodes: RowReader<N>,
    mut edges: RowReader<E>,
    options: &ReaderOptions,
) -> Result<Graph> {
    nodes.skip_header()?;

    let mut graph = Graph::new();
    while let Some(row) = nodes.next_row()? {
        let (id, latitude, longitude) = nodes.parse_node(&row)?;
        graph.add_vertex(Vertex::with_position(id, latitude, longitude))?;
    }

    edges.skip_header()?;
    while let Some(row) = edges.next_row()? {
        let (u, v, w) = edges.parse_edge(&row)?;
        options.add_edge(&mut graph, u, v, w)?;
    }

    Ok(graph)
}
