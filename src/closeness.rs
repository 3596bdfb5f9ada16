use crate::{
    centrality::Scorer,
    graph::{Graph, Node},
    shortest_paths::ShortestPaths,
};

/// Closeness centrality, computed from the distances of a [`ShortestPaths`] oracle.
///
/// On directed graphs a node scores the sum of `1 / d(v, w)` over every other node `w` it reaches,
/// divided by `n - 1`. On undirected graphs it scores `(n - 1)` divided by the sum of its
/// distances, where each unreachable node counts as `n - 1` hops away.
#[derive(Debug, Default)]
pub struct Closeness {
    paths: ShortestPaths,
}

impl Closeness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures distances with `paths`, e.g. a weighted oracle.
    pub fn with_paths(paths: ShortestPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ShortestPaths {
        &self.paths
    }
}

impl Scorer for Closeness {
    fn name(&self) -> &'static str {
        "closeness"
    }

    fn score_node(&mut self, node: Node, graph: &Graph) -> Option<f64> {
        let n = graph.size();
        if n <= 1 {
            return Some(0.0);
        }

        let others = (n - 1) as f64;
        let distances = graph
            .nodes()
            .filter(|&w| w != node)
            .map(|w| self.paths.distance(graph, node, w));

        if graph.is_directed() {
            let inverse: f64 = distances
                .filter(|d| d.is_finite())
                .map(|d| 1.0 / d)
                .sum();

            return Some(inverse / others);
        }

        let total: f64 = distances
            .map(|d| if d.is_finite() { d } else { others })
            .sum();

        Some(if total == 0.0 { 0.0 } else { others / total })
    }
}

#[cfg(test)]
mod tests {
    use crate::centrality::{CentralityMeasure, ClosenessCentrality};

    use super::*;

    #[test]
    fn four_cycle() {
        let graph = graph!(4; [0, 1, 2, 3, 0]);
        let mut closeness = ClosenessCentrality::default();

        for node in graph.nodes() {
            assert_eq!(closeness.centrality(node, &graph), 0.75);
        }
    }

    #[test]
    fn star() {
        let graph = graph!(5; [1, 0, 2], [3, 0, 4]);
        let mut closeness = ClosenessCentrality::default();

        assert_eq!(closeness.centrality(0, &graph), 1.0);
        // One neighbour, three nodes at distance two.
        assert_eq!(closeness.centrality(1, &graph), 4.0 / 7.0);
        assert_eq!(closeness.ranking(&graph).top(1), vec![0]);
    }

    #[test]
    fn unreachable_nodes_are_penalised() {
        let graph = graph!(4; [0, 1]);
        let mut closeness = ClosenessCentrality::default();

        assert_eq!(closeness.centrality(0, &graph), 3.0 / 7.0);
        assert_eq!(closeness.centrality(2, &graph), 1.0 / 3.0);
    }

    #[test]
    fn directed_harmonic() {
        let graph = digraph!(3; [0, 1, 2]);
        let mut closeness = ClosenessCentrality::default();

        assert_eq!(closeness.centrality(0, &graph), 0.75);
        assert_eq!(closeness.centrality(1, &graph), 0.5);
        assert_eq!(closeness.centrality(2, &graph), 0.0);
    }

    #[test]
    fn weighted() {
        let graph = graph!(3; [0, 1, 2]);
        let paths = ShortestPaths::weighted(|i, j| if i.min(j) == 0 { 3.0 } else { 1.0 });
        let mut closeness = ClosenessCentrality::new(Closeness::with_paths(paths));

        // Distances from 0 are 3 and 4.
        assert_eq!(closeness.centrality(0, &graph), 2.0 / 7.0);
        assert_eq!(closeness.scorer().paths().edge_length(1, 2), 1.0);
    }

    #[test]
    fn single_node_scores_like_the_cache() {
        let mut graph = graph!(5; [0, 1, 2, 3], [1, 4]);
        let mut closeness = ClosenessCentrality::default();

        for node in graph.nodes() {
            let single = closeness.compute_single_centrality(node, &graph);
            assert_eq!(single, closeness.centrality(node, &graph));
        }

        graph.add_edge(0, 3);
        assert_eq!(
            closeness.compute_single_centrality(3, &graph),
            closeness.centrality(3, &graph)
        );
    }

    #[test]
    fn low_memory_oracle() {
        let graph = graph!(6; [0, 1, 2, 3, 4, 5], [1, 4]);
        let mut dense = ClosenessCentrality::default();
        let mut low = ClosenessCentrality::new(Closeness::with_paths(
            ShortestPaths::new().with_low_memory_threshold(2),
        ));

        for node in graph.nodes() {
            assert_eq!(dense.centrality(node, &graph), low.centrality(node, &graph));
        }
    }
}
