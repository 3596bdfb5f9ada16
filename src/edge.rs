//! A module for working with edges.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::graph::Node;

/// A pair of vertices representing a graph edge.
///
/// Undirected edges don't have a direction, despite the `source`-`target` nomenclature used:
/// `(a, b)` and `(b, a)` compare (and hash) equal. Directed edges are ordered.
#[derive(Clone, Copy, Debug, Eq, Serialize, Deserialize)]
pub struct Edge {
    source: Node,
    target: Node,
    directed: bool,
}

impl Edge {
    /// Creates a new undirected edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::edge::Edge;
    ///
    /// let edge = Edge::new(0, 1);
    /// assert_eq!(edge, Edge::new(1, 0));
    /// ```
    pub fn new(source: Node, target: Node) -> Self {
        Self {
            source,
            target,
            directed: false,
        }
    }

    /// Creates a new directed edge going from `source` to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::edge::Edge;
    ///
    /// let edge = Edge::directed(0, 1);
    /// assert_ne!(edge, Edge::directed(1, 0));
    /// ```
    pub fn directed(source: Node, target: Node) -> Self {
        Self {
            source,
            target,
            directed: true,
        }
    }

    /// Creates an edge with an explicit direction flag.
    pub fn with_direction(source: Node, target: Node, directed: bool) -> Self {
        Self {
            source,
            target,
            directed,
        }
    }

    /// Returns the first vertex forming the edge.
    pub fn source(&self) -> Node {
        self.source
    }

    /// Returns the second vertex forming the edge.
    pub fn target(&self) -> Node {
        self.target
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns whether the edge contains the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::edge::Edge;
    ///
    /// let edge = Edge::new(0, 1);
    ///
    /// assert_eq!(edge.contains(0), true);
    /// assert_eq!(edge.contains(1), true);
    /// assert_eq!(edge.contains(2), false);
    /// ```
    pub fn contains(&self, vertex: Node) -> bool {
        self.source == vertex || self.target == vertex
    }

    /// Returns the same edge with its endpoints swapped.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            directed: self.directed,
        }
    }

    /// Returns the endpoints as `(min, max)` for undirected edges, `(source, target)` otherwise.
    fn key(&self) -> (Node, Node) {
        if self.directed || self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

//
// Trait implementations
//

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed && self.key() == other.key()
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // This ensures the hash is the same for (a, b) as it is for (b, a) when undirected.
        self.directed.hash(state);
        self.key().hash(state);
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = if self.directed { "->" } else { "--" };
        write!(f, "{}{}{}", self.source, arrow, self.target)
    }
}
