use super::*;

/// Assignment of every node to the connected component it belongs to
#[derive(Clone, Debug)]
pub struct Components {
    class_of_node: Vec<Node>,
    number_of_classes: NumNodes,
}

impl Components {
    pub fn class_of_node(&self, u: Node) -> Node {
        self.class_of_node[u as usize]
    }

    pub fn number_of_classes(&self) -> NumNodes {
        self.number_of_classes
    }
}

pub trait Connectivity {
    fn connected_components(&self) -> Components;

    /// Returns true if the graph has at most one connected component
    fn is_connected(&self) -> bool {
        self.connected_components().number_of_classes() <= 1
    }
}

impl<G> Connectivity for G
where
    G: AdjacencyList,
{
    fn connected_components(&self) -> Components {
        let mut class_of_node = vec![Node::MAX; self.len()];
        if self.is_empty() {
            return Components {
                class_of_node,
                number_of_classes: 0,
            };
        }

        let mut bfs = self.bfs(0);
        let mut class = 0;

        loop {
            for u in bfs.by_ref() {
                class_of_node[u as usize] = class;
            }
            class += 1;

            if !bfs.try_restart_at_unvisited() {
                break;
            }
        }

        Components {
            class_of_node,
            number_of_classes: class,
        }
    }
}
