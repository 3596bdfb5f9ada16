//! A module for working with paths.

use serde::{Deserialize, Serialize};

use crate::{
    edge::Edge,
    graph::{Graph, Node},
};

/// An ordered sequence of nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    nodes: Vec<Node>,
}

impl Path {
    /// Creates a path consisting of a single node.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::path::Path;
    ///
    /// let path = Path::new(3);
    /// assert_eq!(path.first(), Some(3));
    /// assert_eq!(path.len(), 1);
    /// ```
    pub fn new(start: Node) -> Self {
        Self { nodes: vec![start] }
    }

    pub fn first(&self) -> Option<Node> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<Node> {
        self.nodes.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<Node> {
        self.nodes.get(index).copied()
    }

    /// Returns the number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of edges on the path.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn contains(&self, node: Node) -> bool {
        self.nodes.contains(&node)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn push_front(&mut self, node: Node) {
        self.nodes.insert(0, node);
    }

    /// Returns a copy of the path with `node` appended.
    pub fn extended(&self, node: Node) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node);

        Self { nodes }
    }

    /// Returns a copy of the path with `node` prepended.
    pub fn prefixed(&self, node: Node) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.push(node);
        nodes.extend_from_slice(&self.nodes);

        Self { nodes }
    }

    /// Returns the path walked backwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::path::Path;
    ///
    /// let path = Path::from(vec![0, 1, 2]);
    /// assert_eq!(path.reversed(), Path::from(vec![2, 1, 0]));
    /// ```
    pub fn reversed(&self) -> Self {
        Self {
            nodes: self.nodes.iter().rev().copied().collect(),
        }
    }

    /// Iterates over consecutive node pairs as edges of `graph`, carrying its direction flag.
    pub fn edges<'a>(&'a self, graph: &'a Graph) -> impl Iterator<Item = Edge> + 'a {
        self.nodes
            .windows(2)
            .map(move |pair| graph.edge(pair[0], pair[1]))
    }

    /// Returns whether every consecutive pair of nodes is an edge of `graph`.
    pub fn is_walk_in(&self, graph: &Graph) -> bool {
        self.edges(graph).all(|edge| graph.contains(&edge))
    }
}

impl From<Vec<Node>> for Path {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl FromIterator<Node> for Path {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ ")?;
        for node in &self.nodes {
            write!(f, "{node} ")?;
        }
        write!(f, "]")
    }
}
