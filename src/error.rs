//! Errors raised while constructing graphs.
//!
//! Mutations of an existing graph never fail loudly, they report rejection with `false`.

use crate::graph::Node;

/// Errors from building a graph out of an edge list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An edge endpoint is not a node of the graph.
    #[error("node {node} is out of range for a graph of size {size}")]
    NodeOutOfRange { node: Node, size: usize },
    /// Graphs never store self-loops.
    #[error("self-loop on node {0}")]
    SelfLoop(Node),
}

pub type Result<T> = std::result::Result<T, Error>;
