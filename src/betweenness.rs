use itertools::Itertools;
use tracing::instrument;

use crate::{
    centrality::Scorer,
    graph::{Graph, Node},
    shortest_paths::{ShortestPaths, EPSILON},
};

/// Betweenness centrality, the share of shortest paths passing through each node.
///
/// For every source `s`, nodes are visited from the farthest to the closest and each node `v`
/// hands its accumulated control down to every predecessor `w` on a shortest path from `s`:
///
/// `control[w] += paths(s, w) / paths(s, v) * (1 + control[v])`
///
/// The totals over all sources are normalised by `(n - 1)(n - 2)`, for directed and undirected
/// graphs alike. Graphs with less than three nodes score zero everywhere.
#[derive(Debug, Default)]
pub struct Betweenness {
    paths: ShortestPaths,
}

impl Betweenness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts paths with `paths`, e.g. a weighted oracle.
    pub fn with_paths(paths: ShortestPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ShortestPaths {
        &self.paths
    }

    /// Accumulates the control of every node over the shortest paths leaving `source`.
    fn accumulate(&mut self, graph: &Graph, source: Node, totals: &mut [f64]) {
        let dist: Vec<f64> = graph
            .nodes()
            .map(|v| self.paths.distance(graph, source, v))
            .collect();
        let count: Vec<f64> = graph
            .nodes()
            .map(|v| self.paths.number_of_shortest_paths(graph, source, v) as f64)
            .collect();

        let mut control = vec![0.0; graph.size()];
        let farthest_first = graph
            .nodes()
            .filter(|&v| v != source && dist[v].is_finite())
            .sorted_by(|&a, &b| dist[b].total_cmp(&dist[a]));

        for v in farthest_first {
            for &w in graph.preds(v) {
                if w == source {
                    continue;
                }

                if (dist[w] + self.paths.edge_length(w, v) - dist[v]).abs() < EPSILON {
                    control[w] += count[w] / count[v] * (1.0 + control[v]);
                }
            }
        }

        for (total, control) in totals.iter_mut().zip(control) {
            *total += control;
        }
    }
}

impl Scorer for Betweenness {
    fn name(&self) -> &'static str {
        "betweenness"
    }

    #[instrument(skip_all, fields(nodes = graph.size()))]
    fn score_all(&mut self, graph: &Graph) -> Vec<f64> {
        let n = graph.size();
        let mut totals = vec![0.0; n];
        if n < 3 {
            return totals;
        }

        for source in graph.nodes() {
            self.accumulate(graph, source, &mut totals);
        }

        let pairs = ((n - 1) * (n - 2)) as f64;
        totals.iter().map(|total| total / pairs).collect()
    }
}
