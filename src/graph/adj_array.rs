use super::*;
use crate::errors::{Error, Result};
use std::fmt;

/// Undirected weighted graph over the dense node ids `0..n`. Vertices own their outgoing edges;
/// each undirected connection is stored as a pair of mirrored [`DirectedEdge`]s.
#[derive(Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
}

impl GraphNodeOrder for Graph {
    fn number_of_nodes(&self) -> NumNodes {
        self.vertices.len() as NumNodes
    }
}

impl GraphEdgeOrder for Graph {
    /// Relies on every connection being stored as a mirrored pair
    fn number_of_edges(&self) -> NumEdges {
        self.vertices
            .iter()
            .map(|v| v.edges.len() as NumEdges)
            .sum::<NumEdges>()
            / 2
    }
}

impl AdjacencyList for Graph {
    fn edges_of(&self, u: Node) -> &[DirectedEdge] {
        &self.vertices[u as usize].edges
    }
}

impl AdjacencyTest for Graph {
    fn weight_of(&self, u: Node, v: Node) -> Option<Weight> {
        self.find_vertex(u)?
            .edges
            .iter()
            .filter(|e| e.destination == v)
            .map(|e| e.weight)
            .min_by(|a, b| a.total_cmp(b))
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `n` vertices without coordinates and no edges
    pub fn with_nodes(n: NumNodes) -> Self {
        Self {
            vertices: (0..n).map(Vertex::new).collect(),
        }
    }

    /// Returns the vertex with the given id, or `None` if `id` is out of range
    pub fn find_vertex(&self, id: Node) -> Option<&Vertex> {
        self.vertices.get(id as usize)
    }

    /// Appends a vertex. Ids have to be handed out densely, i.e. the id of the new vertex must
    /// equal the current number of nodes. Otherwise the graph remains unchanged.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<Node> {
        let expected = self.number_of_nodes();
        if vertex.id() != expected {
            return Err(Error::DuplicateVertex {
                expected,
                found: vertex.id(),
            });
        }

        self.vertices.push(vertex);
        Ok(expected)
    }

    /// Adds the undirected edge `{u, v}` as two mirrored directed edges.
    /// There is no check against parallel edges; adding the same pair twice yields two connections.
    pub fn add_edge(&mut self, u: Node, v: Node, weight: Weight) -> Result<()> {
        for x in [u, v] {
            if self.find_vertex(x).is_none() {
                return Err(Error::MissingVertex(x));
            }
        }

        self.link(u, v, weight);
        Ok(())
    }

    pub fn add_edges(
        &mut self,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge>>,
    ) -> Result<()> {
        for WeightedEdge(u, v, w) in edges.into_iter().map(|e| e.into()) {
            self.add_edge(u, v, w)?;
        }
        Ok(())
    }

    /// Pushes the mirrored pair of directed edges; both endpoints must exist
    pub(super) fn link(&mut self, u: Node, v: Node, weight: Weight) {
        let index_u = self.vertices[u as usize].edges.len() as u32;
        let index_v = self.vertices[v as usize].edges.len() as u32 + (u == v) as u32;

        self.vertices[u as usize].edges.push(DirectedEdge {
            origin: u,
            destination: v,
            weight,
            reverse: EdgeRef {
                node: v,
                index: index_v,
            },
        });

        self.vertices[v as usize].edges.push(DirectedEdge {
            origin: v,
            destination: u,
            weight,
            reverse: EdgeRef {
                node: u,
                index: index_u,
            },
        });
    }

    /// Returns a graph with copies of all vertices (ids and positions) but without edges
    pub fn empty_copy(&self) -> Graph {
        Graph {
            vertices: self
                .vertices
                .iter()
                .map(|v| match v.position() {
                    Some(p) => Vertex::with_position(v.id(), p.latitude, p.longitude),
                    None => Vertex::new(v.id()),
                })
                .collect(),
        }
    }

    pub fn position_of(&self, u: Node) -> Option<Coordinate> {
        self.find_vertex(u)?.position()
    }

    /// Returns true if every vertex carries a coordinate
    pub fn has_positions(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.iter().all(|v| v.position().is_some())
    }

    pub fn resolve(&self, edge: EdgeRef) -> Option<&DirectedEdge> {
        self.find_vertex(edge.node)?
            .edges
            .get(edge.index as usize)
    }

    /// Returns the mirrored counterpart of `edge`
    pub fn reverse_of(&self, edge: &DirectedEdge) -> Option<&DirectedEdge> {
        self.resolve(edge.reverse)
    }

    /// Returns each undirected connection exactly once, ordered by origin and insertion position
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.vertices.iter().flat_map(|vertex| {
            vertex
                .edges
                .iter()
                .enumerate()
                .filter(move |(index, e)| {
                    (vertex.id(), *index as u32) <= (e.reverse.node, e.reverse.index)
                })
                .map(|(_, e)| e.as_weighted())
        })
    }

    /// Returns true if there is an edge between every pair of distinct vertices
    pub fn is_complete(&self) -> bool {
        let mut seen = BitSet::new(self.number_of_nodes());
        self.vertices().all(|u| {
            seen.unset_all();
            for v in self.neighbors_of(u) {
                seen.set_bit(v);
            }
            seen.unset_bit(u);
            seen.cardinality() + 1 == self.number_of_nodes()
        })
    }

    pub fn test_only_from(edges: impl Clone + IntoIterator<Item = impl Into<WeightedEdge>>) -> Self {
        let n = edges
            .clone()
            .into_iter()
            .map(|e| e.into())
            .map(|e| e.0.max(e.1) + 1)
            .max()
            .unwrap_or(0);
        let mut graph = Self::with_nodes(n as NumNodes);
        graph.add_edges(edges).unwrap();
        graph
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph(n={}, m={}) [", self.number_of_nodes(), self.number_of_edges())?;
        for (i, WeightedEdge(u, v, w)) in self.edges().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{u}-{v}:{w}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn add_vertex_rejects_out_of_sequence() {
        let mut graph = Graph::new();
        assert_eq!(graph.add_vertex(Vertex::new(0)).unwrap(), 0);
        assert_eq!(graph.add_vertex(Vertex::new(1)).unwrap(), 1);

        for id in [0, 1, 3, 17] {
            let res = graph.add_vertex(Vertex::new(id));
            assert!(matches!(
                res,
                Err(Error::DuplicateVertex {
                    expected: 2,
                    found
                }) if found == id
            ));
            assert_eq!(graph.number_of_nodes(), 2);
        }

        assert!(graph.add_vertex(Vertex::with_position(2, 1.0, 2.0)).is_ok());
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.position_of(2), Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(graph.position_of(0), None);
    }

    #[test]
    fn find_vertex() {
        let graph = Graph::with_nodes(4);
        for u in 0..4 {
            assert_eq!(graph.find_vertex(u).unwrap().id(), u);
        }
        assert!(graph.find_vertex(4).is_none());
        assert!(graph.find_vertex(Node::MAX).is_none());
    }

    #[test]
    fn add_edge_with_missing_vertex() {
        let mut graph = Graph::with_nodes(3);
        assert!(matches!(graph.add_edge(0, 3, 1.0), Err(Error::MissingVertex(3))));
        assert!(matches!(graph.add_edge(5, 1, 1.0), Err(Error::MissingVertex(5))));
        assert_eq!(graph.number_of_edges(), 0);
        assert_eq!(graph.degrees().collect_vec(), [0, 0, 0]);
    }

    #[test]
    fn number_of_edges_counts_connections() {
        let mut graph = Graph::with_nodes(5);
        let mut successful = 0;
        for (u, v) in [(0, 1), (1, 2), (2, 7), (3, 4), (4, 0), (0, 1), (9, 9)] {
            successful += graph.add_edge(u, v, 1.5).is_ok() as NumEdges;
        }

        assert_eq!(successful, 5);
        assert_eq!(graph.number_of_edges(), 5);
        assert_eq!(graph.edges().count(), 5);
        assert_eq!(graph.degrees().collect_vec(), [3, 3, 1, 1, 2]);
    }

    #[test]
    fn reverse_edges_are_mirrored() {
        let graph = Graph::test_only_from([(0, 1, 3.0), (1, 2, 4.0), (2, 0, 5.0), (1, 1, 2.0)]);

        for u in graph.vertices() {
            for e in graph.edges_of(u) {
                let rev = graph.reverse_of(e).unwrap();
                assert_eq!(rev.origin, e.destination);
                assert_eq!(rev.destination, e.origin);
                assert_eq!(rev.weight, e.weight);
                assert_eq!(graph.reverse_of(rev).unwrap(), e);
            }
        }

        assert_eq!(graph.number_of_edges(), 4);
        assert_eq!(
            graph.edges().map(|e| (e.0, e.1)).collect_vec(),
            [(0, 1), (0, 2), (1, 2), (1, 1)]
        );
    }

    #[test]
    fn weights_and_completeness() {
        let mut graph = Graph::test_only_from([(0, 1, 3.0), (1, 2, 4.0)]);
        assert_eq!(graph.weight_of(0, 1), Some(3.0));
        assert_eq!(graph.weight_of(1, 0), Some(3.0));
        assert_eq!(graph.weight_of(0, 2), None);
        assert!(!graph.is_complete());

        graph.add_edge(2, 0, 7.0).unwrap();
        graph.add_edge(0, 2, 6.0).unwrap();
        assert!(graph.is_complete());
        assert_eq!(graph.weight_of(2, 0), Some(6.0));
    }
}
