use crate::{
    centrality::Scorer,
    graph::{Graph, Node},
};

/// Degree centrality: the share of possible incident edges a node has.
///
/// Undirected graphs divide the degree by `n - 1`. Directed graphs count both in- and out-edges
/// and divide by `2(n - 1)`. Graphs with less than two nodes score zero everywhere.
///
/// # Examples
///
/// ```
/// use wraith::centrality::{CentralityMeasure, DegreeCentrality};
/// use wraith::graph::Graph;
///
/// let graph = Graph::from_edges(3, false, [(0, 1), (1, 2)]).unwrap();
/// let mut degree = DegreeCentrality::default();
///
/// assert_eq!(degree.centrality(1, &graph), 1.0);
/// assert_eq!(degree.centrality(0, &graph), 0.5);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Degree;

impl Scorer for Degree {
    fn name(&self) -> &'static str {
        "degree"
    }

    fn score_node(&mut self, node: Node, graph: &Graph) -> Option<f64> {
        let n = graph.size();
        if n <= 1 {
            return Some(0.0);
        }

        let possible = if graph.is_directed() {
            2 * (n - 1)
        } else {
            n - 1
        };

        Some(graph.degree(node) as f64 / possible as f64)
    }
}
