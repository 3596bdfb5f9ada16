//! Centrality measures: per-node structural importance scores.
//!
//! A measure is a [`Scorer`], which knows how to score either one node at a time or all nodes at
//! once. [`Centrality`] wraps a scorer with a score cache bound to a single graph: the first query
//! after a rebind or a change to the graph recomputes every score, later queries are lookups.
//!
//! ```rust
//! use wraith::centrality::{CentralityMeasure, DegreeCentrality, RumorCentrality};
//! use wraith::graph::Graph;
//!
//! // A star with node 0 at its centre.
//! let graph = Graph::from_edges(4, false, [(0, 1), (0, 2), (0, 3)]).unwrap();
//!
//! let mut measures: Vec<Box<dyn CentralityMeasure>> = vec![
//!     Box::new(DegreeCentrality::default()),
//!     Box::new(RumorCentrality::default()),
//! ];
//!
//! for measure in &mut measures {
//!     assert_eq!(measure.ranking(&graph).top(1), vec![0]);
//! }
//! ```

use std::time::Instant;

use tracing::debug;

pub use crate::{
    betweenness::Betweenness,
    closeness::Closeness,
    degree::Degree,
    eigenvector::{Eigenvector, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION},
    rumor::Rumor,
};
use crate::{
    event::Binding,
    graph::{Graph, Node},
    ranking::Ranking,
};

pub type DegreeCentrality = Centrality<Degree>;
pub type ClosenessCentrality = Centrality<Closeness>;
pub type EigenvectorCentrality = Centrality<Eigenvector>;
pub type BetweennessCentrality = Centrality<Betweenness>;
pub type RumorCentrality = Centrality<Rumor>;

/// The scoring strategy of a centrality measure.
///
/// Implement [`score_node`](Scorer::score_node) for measures defined node by node, and override
/// [`score_all`](Scorer::score_all) for measures that are only computed for the whole graph at
/// once. Scorers never mutate the graph.
///
/// Every scorer must implement at least one of the two: with neither, the default `score_all`
/// scores every node `NaN`.
pub trait Scorer {
    fn name(&self) -> &'static str;

    /// Scores `node` alone, `None` if the measure can only be computed in bulk.
    fn score_node(&mut self, _node: Node, _graph: &Graph) -> Option<f64> {
        None
    }

    /// Scores every node, indexed by node. Nodes [`score_node`](Scorer::score_node) can't score
    /// get `NaN`.
    fn score_all(&mut self, graph: &Graph) -> Vec<f64> {
        graph
            .nodes()
            .map(|node| self.score_node(node, graph).unwrap_or(f64::NAN))
            .collect()
    }
}

/// Object-safe interface over every cached centrality measure.
pub trait CentralityMeasure {
    fn name(&self) -> &'static str;

    /// Returns the (cached) score of `node` in `graph`.
    fn centrality(&mut self, node: Node, graph: &Graph) -> f64;

    /// Ranks every node of `graph` by descending score.
    fn ranking(&mut self, graph: &Graph) -> Ranking;

    /// Scores `node` without filling the cache if the measure allows it, otherwise falls back to
    /// [`centrality`](CentralityMeasure::centrality).
    fn compute_single_centrality(&mut self, node: Node, graph: &Graph) -> f64;
}

/// A scorer together with the scores it computed for the graph it is bound to.
#[derive(Debug, Default)]
pub struct Centrality<S> {
    scorer: S,
    binding: Binding,
    scores: Option<Vec<f64>>,
}

impl<S: Scorer> Centrality<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            binding: Binding::new(),
            scores: None,
        }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Returns the scores of every node of `graph`, recomputing them if stale.
    pub fn scores(&mut self, graph: &Graph) -> &[f64] {
        if self.binding.refresh(graph) {
            self.scores = None;
        }

        match &mut self.scores {
            Some(scores) => scores,
            slot => {
                let start = Instant::now();
                let scores = self.scorer.score_all(graph);
                debug!(
                    measure = self.scorer.name(),
                    nodes = graph.size(),
                    elapsed = ?start.elapsed(),
                    "recomputed centrality"
                );

                slot.insert(scores)
            }
        }
    }

    /// Returns whether scores for the bound graph are cached and current.
    pub fn is_fresh(&self) -> bool {
        self.scores.is_some() && !self.binding.is_stale()
    }

    /// Unbinds from `graph`, dropping the cached scores.
    pub fn release(&mut self, graph: &Graph) {
        self.binding.release(graph);
        self.scores = None;
    }
}

impl<S: Scorer> CentralityMeasure for Centrality<S> {
    fn name(&self) -> &'static str {
        self.scorer.name()
    }

    fn centrality(&mut self, node: Node, graph: &Graph) -> f64 {
        self.scores(graph)[node]
    }

    fn ranking(&mut self, graph: &Graph) -> Ranking {
        Ranking::from_scores(self.scores(graph))
    }

    fn compute_single_centrality(&mut self, node: Node, graph: &Graph) -> f64 {
        match self.scorer.score_node(node, graph) {
            Some(score) => score,
            None => self.centrality(node, graph),
        }
    }
}
