use crate::{
    bfs::BfsTree,
    centrality::Scorer,
    graph::{Graph, Node},
};

/// Rumor centrality: how likely a node is to be the source of a rumor that spread along the
/// breadth-first tree rooted at it.
///
/// With `T(u)` the size of the subtree below `u` in the tree rooted at `v`, the score of `v` is
/// the product of `(u + 1) / T(u)` over every node `u`. A node that doesn't reach the whole graph
/// leaves some subtree empty and scores infinity.
///
/// # Examples
///
/// ```
/// use wraith::centrality::{CentralityMeasure, RumorCentrality};
/// use wraith::graph::Graph;
///
/// let graph = Graph::from_edges(3, false, [(0, 1), (1, 2)]).unwrap();
/// let mut rumor = RumorCentrality::default();
///
/// assert!((rumor.centrality(1, &graph) - 2.0).abs() < 1e-12);
/// assert!((rumor.centrality(0, &graph) - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Rumor;

impl Scorer for Rumor {
    fn name(&self) -> &'static str {
        "rumor"
    }

    fn score_node(&mut self, node: Node, graph: &Graph) -> Option<f64> {
        let sizes = BfsTree::new(graph, node).subtree_sizes();

        let score = graph
            .nodes()
            .fold(1.0, |score, u| score * (u + 1) as f64 / sizes[u] as f64);

        Some(score)
    }
}
