//! Rooted breadth-first traversal.

use std::collections::VecDeque;

use crate::graph::{Graph, Node};

/// The tree discovered by a breadth-first search from a root, following successor edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BfsTree {
    root: Node,
    /// Nodes in the order they were discovered, starting with the root.
    order: Vec<Node>,
    /// The node each node was discovered from, `None` for the root and unreached nodes.
    parent: Vec<Option<Node>>,
}

impl BfsTree {
    /// Runs a breadth-first search on `graph` from `root`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::bfs::BfsTree;
    /// use wraith::graph::Graph;
    ///
    /// let graph = Graph::from_edges(4, false, [(0, 1), (0, 2), (2, 3)]).unwrap();
    /// let tree = BfsTree::new(&graph, 0);
    ///
    /// assert_eq!(tree.order(), &[0, 1, 2, 3]);
    /// assert_eq!(tree.parent(3), Some(2));
    /// ```
    pub fn new(graph: &Graph, root: Node) -> Self {
        let mut order = Vec::with_capacity(graph.size());
        let mut parent = vec![None; graph.size()];
        let mut discovered = vec![false; graph.size()];
        let mut queue = VecDeque::from([root]);
        discovered[root] = true;

        while let Some(i) = queue.pop_front() {
            order.push(i);

            for &j in graph.succs(i) {
                if !discovered[j] {
                    discovered[j] = true;
                    parent[j] = Some(i);
                    queue.push_back(j);
                }
            }
        }

        Self {
            root,
            order,
            parent,
        }
    }

    pub fn root(&self) -> Node {
        self.root
    }

    /// Returns the reached nodes in discovery order.
    pub fn order(&self) -> &[Node] {
        &self.order
    }

    pub fn parent(&self, node: Node) -> Option<Node> {
        self.parent.get(node).copied().flatten()
    }

    pub fn reached(&self) -> usize {
        self.order.len()
    }

    /// Computes the size of the subtree hanging from every node, zero for unreached nodes.
    ///
    /// Nodes are visited in reverse discovery order, so each subtree is complete before it is
    /// added to its parent.
    pub fn subtree_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.parent.len()];

        for &node in self.order.iter().rev() {
            sizes[node] += 1;
            if let Some(parent) = self.parent[node] {
                sizes[parent] += sizes[node];
            }
        }

        sizes
    }
}
