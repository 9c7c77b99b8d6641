use std::io::BufRead;

use super::{ReaderOptions, RowReader};
use crate::{errors::Result, graph::*};

/// Edge file only; the vertex count is one more than the largest id in either column. Ids may
/// not exceed the number of endpoints in the file, so that every vertex can carry an edge.
pub(super) fn read<R: BufRead>(mut edges: RowReader<R>, options: &ReaderOptions) -> Result<Graph> {
    edges.skip_header()?;

    let mut rows = Vec::new();
    while let Some(row) = edges.next_row()? {
        rows.push((edges.line(), edges.parse_edge(&row)?));
    }

    let endpoints = 2 * rows.len() as u64;
    if let Some(&(line, (u, v, _))) = rows
        .iter()
        .find(|(_, (u, v, _))| u64::from(*u.max(v)) >= endpoints)
    {
        return Err(edges.error_at(
            line,
            format!(
                "vertex id {} exceeds the {endpoints} edge endpoints of the file",
                u.max(v)
            ),
        ));
    }

    let n = rows
        .iter()
        .map(|&(_, (u, v, _))| u.max(v) + 1)
        .max()
        .unwrap_or(0);

    let mut graph = Graph::with_nodes(n);
    for (_, (u, v, w)) in rows {
        options.add_edge(&mut graph, u, v, w)?;
    }

    Ok(graph)
}

#[cfg(test)]
mod test {
    use crate::{
        errors::Error,
        exact::branch_and_bound::branch_and_bound,
        graph::*,
        io::{GraphCsvReader, ReaderOptions},
    };

    const SHIPPING: &str = "origem,destino,distancia\n0,1,10\n1,2,15\n2,3,20\n3,0,25\n";

    #[test]
    fn four_cycle() {
        let graph = Graph::try_read_toy(SHIPPING.as_bytes(), &ReaderOptions::default()).unwrap();
        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 4);
        assert_eq!(graph.weight_of(3, 0), Some(25.0));
        assert!(!graph.has_edge(0, 2));
        assert!(!graph.has_edge(1, 3));

        assert_eq!(branch_and_bound(&graph, 0).unwrap().length, 70.0);
    }

    #[test]
    fn labels_and_blank_line() {
        let content = "origem,destino,distancia,label origem,label destino\n\
                       0,2,1.5,a,c\n\
                       2,1,2.5,c,b\n\
                       \n\
                       7,8,garbage\n";
        let graph = Graph::try_read_toy(content.as_bytes(), &ReaderOptions::default()).unwrap();
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 2);
        assert!(!graph.has_positions());
    }

    #[test]
    fn malformed_rows() {
        for content in ["", "h\n0,1\n", "h\n0;1;3\n", "h\n0,1,3\nx,1,3\n"] {
            let res = Graph::try_read_toy(content.as_bytes(), &ReaderOptions::default());
            assert!(matches!(res, Err(Error::MalformedInput { .. })), "{content:?}");
        }
    }

    #[test]
    fn sparse_ids_are_rejected() {
        let res = Graph::try_read_toy("h\n0,4000000000,1\n".as_bytes(), &ReaderOptions::default());
        assert!(matches!(res, Err(Error::MalformedInput { line: 2, .. })));

        let res = Graph::try_read_toy("h\n0,1,1\n1,4,1\n".as_bytes(), &ReaderOptions::default());
        assert!(matches!(res, Err(Error::MalformedInput { line: 3, .. })));

        // ids up to the number of endpoints are fine; vertex 2 stays isolated
        let graph =
            Graph::try_read_toy("h\n0,1,1\n1,3,1\n".as_bytes(), &ReaderOptions::default()).unwrap();
        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 2);
    }

    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shipping.csv");
        std::fs::write(&path, SHIPPING).unwrap();

        let graph = Graph::try_read_toy_file(&path, &ReaderOptions::default()).unwrap();
        assert_eq!(graph.number_of_edges(), 4);

        let missing = Graph::try_read_toy_file(dir.path().join("nope.csv"), &ReaderOptions::default());
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
