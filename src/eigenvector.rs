use nalgebra::DVector;
use tracing::{instrument, trace, warn};

use crate::{centrality::Scorer, graph::Graph};

pub const DEFAULT_PRECISION: f64 = 1e-9;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Eigenvector centrality, approximated by power iteration.
///
/// Starting from all ones, every step replaces each score by the sum of the scores of the node's
/// successors and rescales the result to unit length. Iteration stops once the sum of all scores
/// moves by less than the precision between two steps, or after the iteration cap, in which case
/// the last iterate is kept.
#[derive(Clone, Debug)]
pub struct Eigenvector {
    precision: f64,
    max_iterations: usize,
    iterations: usize,
    converged: bool,
}

impl Default for Eigenvector {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl Eigenvector {
    pub fn new(precision: f64) -> Self {
        Self {
            precision,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            iterations: 0,
            converged: false,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// The number of steps taken by the last computation.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the last computation reached the precision before the iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl Scorer for Eigenvector {
    fn name(&self) -> &'static str {
        "eigenvector"
    }

    #[instrument(skip_all, fields(nodes = graph.size(), precision = self.precision))]
    fn score_all(&mut self, graph: &Graph) -> Vec<f64> {
        let n = graph.size();
        let mut scores = DVector::from_element(n, 1.0);
        let mut control = scores.sum();

        self.iterations = 0;
        self.converged = false;

        while self.iterations < self.max_iterations {
            self.iterations += 1;

            let next = DVector::from_fn(n, |v, _| {
                graph.succs(v).iter().map(|&w| scores[w]).sum::<f64>()
            });
            let norm = next.norm();
            scores = if norm > 0.0 { next.unscale(norm) } else { next };

            let sum = scores.sum();
            trace!(iteration = self.iterations, sum);
            if (sum - control).abs() < self.precision {
                self.converged = true;
                break;
            }
            control = sum;
        }

        if !self.converged {
            warn!(
                iterations = self.iterations,
                "eigenvector centrality did not converge, keeping the last iterate"
            );
        }

        scores.as_slice().to_vec()
    }
}
