use std::{io::BufRead, path::Path};

use super::{ReaderOptions, RowReader};
use crate::{
    errors::{Error, Result},
    graph::*,
};

/// Extracts `25` from e.g. `edges_25.csv`: the text between the first `_` and the following `.`
/// of the file name
pub fn number_of_nodes_from_file_name(path: &Path) -> Result<NumNodes> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split_once('_'))
        .and_then(|(_, rest)| rest.split('.').next())
        .and_then(|count| count.parse().ok())
        .ok_or_else(|| Error::malformed(path, 0, "file name does not contain the number of vertices"))
}

/// Node rows with an id of at least `number_of_nodes` end the node file. The edge file has no
/// header.
pub(super) fn read<N: BufRead, E: BufRead>(
    mut nodes: RowReader<N>,
    mut edges: RowReader<E>,
    number_of_nodes: NumNodes,
    options: &ReaderOptions,
) -> Result<Graph> {
    nodes.skip_header()?;

    let mut graph = Graph::new();
    while let Some(row) = nodes.next_row()? {
        let (id, latitude, longitude) = nodes.parse_node(&row)?;
        if id >= number_of_nodes {
            break;
        }
        graph.add_vertex(Vertex::with_position(id, latitude, longitude))?;
    }

    while let Some(row) = edges.next_row()? {
        let (u, v, w) = edges.parse_edge(&row)?;
        options.add_edge(&mut graph, u, v, w)?;
    }

    Ok(graph)
}
