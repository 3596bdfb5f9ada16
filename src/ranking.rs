//! Nodes ordered by score.

use std::collections::HashMap;

use itertools::Itertools;

use crate::graph::Node;

/// Nodes sorted by descending score, ties broken by ascending node id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranking {
    entries: Vec<(Node, f64)>,
    positions: HashMap<Node, usize>,
}

impl Ranking {
    /// Ranks the given `(node, score)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::ranking::Ranking;
    ///
    /// let ranking = Ranking::new([(0, 0.5), (1, 2.0), (2, 1.0)]);
    ///
    /// assert_eq!(ranking.nodes().collect::<Vec<_>>(), vec![1, 2, 0]);
    /// assert_eq!(ranking.position(0), Some(2));
    /// ```
    pub fn new(scores: impl IntoIterator<Item = (Node, f64)>) -> Self {
        let entries: Vec<(Node, f64)> = scores
            .into_iter()
            .sorted_by(|(a, x), (b, y)| y.total_cmp(x).then(a.cmp(b)))
            .collect();
        let positions = entries
            .iter()
            .enumerate()
            .map(|(position, (node, _))| (*node, position))
            .collect();

        Self { entries, positions }
    }

    /// Ranks a score vector indexed by node.
    pub fn from_scores(scores: &[f64]) -> Self {
        Self::new(scores.iter().copied().enumerate())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the nodes from the highest score down.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.entries.iter().map(|(node, _)| *node)
    }

    /// Iterates over `(node, score)` pairs from the highest score down.
    pub fn iter(&self) -> impl Iterator<Item = (Node, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the `k` best nodes.
    pub fn top(&self, k: usize) -> Vec<Node> {
        self.nodes().take(k).collect()
    }

    pub fn score(&self, node: Node) -> Option<f64> {
        self.position(node).map(|position| self.entries[position].1)
    }

    /// Returns the zero-based position of `node`.
    pub fn position(&self, node: Node) -> Option<usize> {
        self.positions.get(&node).copied()
    }

    /// Returns the one-based position of `node` when all nodes scoring within `epsilon` of it share
    /// the average of the positions they occupy.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::ranking::Ranking;
    ///
    /// let ranking = Ranking::new([(0, 3.0), (1, 1.0), (2, 1.0), (3, 1.0)]);
    ///
    /// assert_eq!(ranking.ex_aequo_position(0, 1e-9), Some(1.0));
    /// // Nodes 1, 2 and 3 occupy positions 2, 3 and 4.
    /// assert_eq!(ranking.ex_aequo_position(3, 1e-9), Some(3.0));
    /// ```
    pub fn ex_aequo_position(&self, node: Node, epsilon: f64) -> Option<f64> {
        let score = self.score(node)?;

        let better = self
            .entries
            .iter()
            .filter(|(_, other)| *other > score + epsilon)
            .count();
        let tied = self
            .entries
            .iter()
            .filter(|(_, other)| *other == score || (*other - score).abs() <= epsilon)
            .count();

        Some(better as f64 + (tied as f64 + 1.0) / 2.0)
    }
}
