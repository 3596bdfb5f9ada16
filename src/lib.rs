//! Wraith is a small toolkit for analysing graphs that are edited in place, such as a network
//! being rewired over hundreds of trial mutations.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure: a fixed set of nodes
//! `0..n` and an edge set that can be mutated, observed and rolled back. Expensive derived state,
//! [shortest paths](shortest_paths::ShortestPaths) and [centrality](centrality) scores, is cached
//! next to the graph and recomputed only after the graph changes.
//!
//! ```rust
//! use wraith::centrality::{BetweennessCentrality, CentralityMeasure};
//! use wraith::graph::Graph;
//! use wraith::shortest_paths::ShortestPaths;
//!
//! // A line topology: 0 - 1 - 2 - 3.
//! let mut graph = Graph::from_edges(4, false, [(0, 1), (1, 2), (2, 3)]).unwrap();
//!
//! let mut paths = ShortestPaths::new();
//! assert_eq!(paths.distance(&graph, 0, 3), 3.0);
//!
//! // Record the edits so they can be undone.
//! graph.start_recording_history();
//! graph.add_edge(0, 3);
//! assert_eq!(paths.distance(&graph, 0, 3), 1.0);
//!
//! let mut betweenness = BetweennessCentrality::default();
//! let ranking = betweenness.ranking(&graph);
//! println!("{:?}", ranking.nodes().collect::<Vec<_>>());
//!
//! // Roll everything back in one go.
//! graph.reset_graph();
//! assert_eq!(paths.distance(&graph, 0, 3), 3.0);
//! ```

/// Builds an undirected graph of size `n` from node paths, e.g. `graph!(4; [0, 1, 2], [2, 3])`.
#[cfg(test)]
macro_rules! graph {
    ($n:expr; $($path:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut graph = $crate::graph::Graph::new($n);

        $(
            let path: &[usize] = &$path;
            for pair in path.windows(2) {
                graph.add_edge(pair[0], pair[1]);
            }
        )*

        graph
    }};
}

/// Builds a directed graph of size `n` from node paths.
#[cfg(test)]
macro_rules! digraph {
    ($n:expr; $($path:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut graph = $crate::graph::Graph::new_directed($n);

        $(
            let path: &[usize] = &$path;
            for pair in path.windows(2) {
                graph.add_edge(pair[0], pair[1]);
            }
        )*

        graph
    }};
}

mod betweenness;
pub mod bfs;
pub mod centrality;
mod closeness;
mod degree;
pub mod edge;
mod eigenvector;
pub mod error;
pub mod event;
pub mod graph;
pub mod path;
pub mod ranking;
mod rumor;
pub mod shortest_paths;

pub use error::{Error, Result};
