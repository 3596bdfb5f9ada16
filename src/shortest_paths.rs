//! Cached shortest paths over a mutable graph.
//!
//! The oracle answers distance, path count, first step and path queries. Small graphs (up to
//! [`LOW_MEMORY_THRESHOLD`] nodes by default) get full all-pairs tables computed on the first
//! query, larger graphs keep only the row of the most recently queried root. Any change to the
//! bound graph discards everything.

use std::{
    cmp::Ordering,
    collections::BinaryHeap,
    fmt,
    rc::Rc,
    time::Instant,
};

use itertools::Itertools;
use tracing::debug;

use crate::{
    event::Binding,
    graph::{Graph, Node},
    path::Path,
};

/// Graphs larger than this only cache a single root at a time.
pub const LOW_MEMORY_THRESHOLD: usize = 20_000;

/// Tolerance when comparing path lengths.
pub(crate) const EPSILON: f64 = 1e-6;

/// The length of the edge `(i, j)`, must be non-negative.
pub type EdgeLength = Rc<dyn Fn(Node, Node) -> f64>;

/// Shortest path data from (or, when reversed, towards) a single root.
#[derive(Clone, Debug)]
struct Row {
    root: Node,
    dist: Vec<f64>,
    count: Vec<u64>,
    /// Forward rows hold the first node after the root, reversed rows the next hop towards it.
    step: Vec<Option<Node>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    /// Follow successor edges away from the root.
    Forward,
    /// Follow predecessor edges, measuring distances towards the root.
    Backward,
}

/// Shortest path oracle bound to one graph at a time.
pub struct ShortestPaths {
    binding: Binding,
    length: EdgeLength,
    low_memory_threshold: usize,
    /// One row per root, only used at or below the threshold.
    dense: Option<Vec<Row>>,
    /// The most recently queried root, only used above the threshold.
    rooted: Option<Row>,
    /// The most recently queried destination.
    reversed: Option<Row>,
}

impl Default for ShortestPaths {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortestPaths {
    /// Creates an oracle where every edge has length 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::graph::Graph;
    /// use wraith::shortest_paths::ShortestPaths;
    ///
    /// let graph = Graph::from_edges(3, false, [(0, 1), (1, 2)]).unwrap();
    /// let mut paths = ShortestPaths::new();
    ///
    /// assert_eq!(paths.distance(&graph, 0, 2), 2.0);
    /// assert_eq!(paths.step(&graph, 0, 2), Some(1));
    /// ```
    pub fn new() -> Self {
        Self::weighted(|_, _| 1.0)
    }

    /// Creates an oracle measuring the edge `(i, j)` with `length(i, j)`.
    ///
    /// Lengths must be non-negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::graph::Graph;
    /// use wraith::shortest_paths::ShortestPaths;
    ///
    /// let graph = Graph::from_edges(3, false, [(0, 1), (1, 2), (0, 2)]).unwrap();
    /// let mut paths = ShortestPaths::weighted(|i, j| if i + j == 2 { 5.0 } else { 1.0 });
    ///
    /// assert_eq!(paths.distance(&graph, 0, 2), 2.0);
    /// ```
    pub fn weighted(length: impl Fn(Node, Node) -> f64 + 'static) -> Self {
        Self {
            binding: Binding::new(),
            length: Rc::new(length),
            low_memory_threshold: LOW_MEMORY_THRESHOLD,
            dense: None,
            rooted: None,
            reversed: None,
        }
    }

    /// Sets the graph size above which only a single root is cached at a time.
    pub fn with_low_memory_threshold(mut self, threshold: usize) -> Self {
        self.low_memory_threshold = threshold;
        self
    }

    pub fn low_memory_threshold(&self) -> usize {
        self.low_memory_threshold
    }

    /// Returns whether queries on `graph` use the single-root cache.
    pub fn is_low_memory(&self, graph: &Graph) -> bool {
        graph.size() > self.low_memory_threshold
    }

    pub fn edge_length(&self, i: Node, j: Node) -> f64 {
        (self.length)(i, j)
    }

    /// Returns the length of the shortest path from `i` to `j`, infinite if there is none.
    pub fn distance(&mut self, graph: &Graph, i: Node, j: Node) -> f64 {
        self.row(graph, i).dist[j]
    }

    /// Returns the number of distinct shortest paths from `i` to `j`, zero if there is none.
    pub fn number_of_shortest_paths(&mut self, graph: &Graph, i: Node, j: Node) -> u64 {
        self.row(graph, i).count[j]
    }

    /// Returns the node following `i` on a shortest path to `j`.
    ///
    /// `None` when `j` is unreachable or equal to `i`.
    pub fn step(&mut self, graph: &Graph, i: Node, j: Node) -> Option<Node> {
        self.row(graph, i).step[j]
    }

    /// Returns a shortest path from `from` to `to`, `None` if `to` is unreachable.
    pub fn shortest_path(&mut self, graph: &Graph, from: Node, to: Node) -> Option<Path> {
        if self.is_low_memory(graph) {
            let length = Rc::clone(&self.length);
            let row = self.row(graph, from);
            return walk_backward(graph, row, to, &*length);
        }

        let rows = self.dense_rows(graph);
        if rows[from].dist[to].is_infinite() {
            return None;
        }

        let mut path = Path::new(from);
        let mut current = from;
        while current != to {
            current = rows[current].step[to]?;
            path.push(current);
        }

        Some(path)
    }

    /// Returns every shortest path from `from` to `to`, none if `to` is unreachable.
    pub fn all_shortest_paths(&mut self, graph: &Graph, from: Node, to: Node) -> Vec<Path> {
        let length = Rc::clone(&self.length);
        let row = self.row(graph, from);
        enumerate_forward(graph, &row.dist, from, to, &*length)
    }

    //
    // Queries rooted at the destination
    //

    /// Returns the length of the shortest path from `from` to `to`, caching distances towards `to`.
    pub fn reversed_distance(&mut self, graph: &Graph, from: Node, to: Node) -> f64 {
        self.reversed_row(graph, to).dist[from]
    }

    pub fn reversed_number_of_shortest_paths(
        &mut self,
        graph: &Graph,
        from: Node,
        to: Node,
    ) -> u64 {
        self.reversed_row(graph, to).count[from]
    }

    /// Returns the node following `from` on a shortest path to `to`.
    pub fn reversed_step(&mut self, graph: &Graph, from: Node, to: Node) -> Option<Node> {
        self.reversed_row(graph, to).step[from]
    }

    pub fn reversed_shortest_path(&mut self, graph: &Graph, from: Node, to: Node) -> Option<Path> {
        let length = Rc::clone(&self.length);
        let row = self.reversed_row(graph, to);
        walk_forward(graph, row, from, &*length)
    }

    pub fn reversed_all_shortest_paths(
        &mut self,
        graph: &Graph,
        from: Node,
        to: Node,
    ) -> Vec<Path> {
        let length = Rc::clone(&self.length);
        let row = self.reversed_row(graph, to);
        enumerate_backward(graph, &row.dist, from, to, &*length)
    }

    //
    // Private
    //

    /// Drops every cached table if the graph changed or isn't the one bound.
    fn refresh(&mut self, graph: &Graph) {
        if self.binding.refresh(graph) {
            self.dense = None;
            self.rooted = None;
            self.reversed = None;
        }
    }

    fn row(&mut self, graph: &Graph, root: Node) -> &Row {
        if !self.is_low_memory(graph) {
            return &self.dense_rows(graph)[root];
        }

        self.refresh(graph);
        let length = Rc::clone(&self.length);

        if self.rooted.as_ref().is_some_and(|row| row.root != root) {
            self.rooted = None;
        }

        self.rooted
            .get_or_insert_with(|| timed_dijkstra(graph, root, Direction::Forward, &*length))
    }

    fn reversed_row(&mut self, graph: &Graph, root: Node) -> &Row {
        self.refresh(graph);
        let length = Rc::clone(&self.length);

        if self.reversed.as_ref().is_some_and(|row| row.root != root) {
            self.reversed = None;
        }

        self.reversed
            .get_or_insert_with(|| timed_dijkstra(graph, root, Direction::Backward, &*length))
    }

    fn dense_rows(&mut self, graph: &Graph) -> &[Row] {
        self.refresh(graph);
        let length = Rc::clone(&self.length);

        self.dense.get_or_insert_with(|| {
            let start = Instant::now();
            let rows: Vec<Row> = graph
                .nodes()
                .map(|root| dijkstra(graph, root, Direction::Forward, &*length))
                .collect();
            debug!(
                nodes = graph.size(),
                elapsed = ?start.elapsed(),
                "recomputed all-pairs shortest paths"
            );

            rows
        })
    }
}

impl fmt::Debug for ShortestPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortestPaths")
            .field("binding", &self.binding)
            .field("low_memory_threshold", &self.low_memory_threshold)
            .field("dense", &self.dense.is_some())
            .field("rooted", &self.rooted.as_ref().map(|row| row.root))
            .field("reversed", &self.reversed.as_ref().map(|row| row.root))
            .finish()
    }
}

//
// Helpers
//

/// A queue entry ordered so that the max-heap pops the closest node first, the smallest id on ties.
#[derive(Clone, Copy, Debug, PartialEq)]
struct State {
    cost: f64,
    node: Node,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn timed_dijkstra(
    graph: &Graph,
    root: Node,
    direction: Direction,
    length: &dyn Fn(Node, Node) -> f64,
) -> Row {
    let start = Instant::now();
    let row = dijkstra(graph, root, direction, length);
    debug!(root, ?direction, elapsed = ?start.elapsed(), "recomputed single-root shortest paths");

    row
}

/// Single-root Dijkstra that also counts shortest paths.
///
/// A shorter distance resets the count and step of a node, one within [`EPSILON`] adds to its
/// count.
fn dijkstra(
    graph: &Graph,
    root: Node,
    direction: Direction,
    length: &dyn Fn(Node, Node) -> f64,
) -> Row {
    let n = graph.size();
    let mut dist = vec![f64::INFINITY; n];
    let mut count = vec![0u64; n];
    let mut step = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[root] = 0.0;
    count[root] = 1;
    heap.push(State {
        cost: 0.0,
        node: root,
    });

    while let Some(State { cost, node: i }) = heap.pop() {
        // Skip entries superseded by a shorter distance.
        if cost > dist[i] {
            continue;
        }

        let neighbours = match direction {
            Direction::Forward => graph.succs(i),
            Direction::Backward => graph.preds(i),
        };

        for &j in neighbours {
            let candidate = match direction {
                Direction::Forward => dist[i] + length(i, j),
                Direction::Backward => dist[i] + length(j, i),
            };

            // Lengths within EPSILON tie, as in path enumeration and betweenness.
            if (candidate - dist[j]).abs() < EPSILON {
                count[j] = count[j].saturating_add(count[i]);
            } else if candidate < dist[j] {
                dist[j] = candidate;
                count[j] = count[i];
                step[j] = match direction {
                    Direction::Forward if i == root => Some(j),
                    Direction::Forward => step[i],
                    Direction::Backward => Some(i),
                };
                heap.push(State {
                    cost: candidate,
                    node: j,
                });
            }
        }
    }

    Row {
        root,
        dist,
        count,
        step,
    }
}

/// Rebuilds a path to `to` from a forward row by repeatedly picking the predecessor that realises
/// the distance.
fn walk_backward(
    graph: &Graph,
    row: &Row,
    to: Node,
    length: &dyn Fn(Node, Node) -> f64,
) -> Option<Path> {
    if row.dist[to].is_infinite() {
        return None;
    }

    let mut nodes = vec![to];
    let mut current = to;
    while current != row.root {
        current = graph
            .preds(current)
            .iter()
            .copied()
            .min_by(|&a, &b| {
                (row.dist[a] + length(a, current)).total_cmp(&(row.dist[b] + length(b, current)))
            })?;
        nodes.push(current);
    }
    nodes.reverse();

    Some(Path::from(nodes))
}

/// Rebuilds a path from `from` using a reversed row by repeatedly picking the successor closest to
/// the root.
fn walk_forward(
    graph: &Graph,
    row: &Row,
    from: Node,
    length: &dyn Fn(Node, Node) -> f64,
) -> Option<Path> {
    if row.dist[from].is_infinite() {
        return None;
    }

    let mut path = Path::new(from);
    let mut current = from;
    while current != row.root {
        current = graph
            .succs(current)
            .iter()
            .copied()
            .min_by(|&a, &b| {
                (length(current, a) + row.dist[a]).total_cmp(&(length(current, b) + row.dist[b]))
            })?;
        path.push(current);
    }

    Some(path)
}

/// Enumerates every shortest path from `from` to `to` given the distances `dist` from `from`.
///
/// Nodes are swept from the farthest to the closest, so the paths from each successor to `to` are
/// complete when a node is reached. An edge `(i, j)` extends the paths of `j` iff
/// `dist[i] + len(i, j) + dist_to[j]` matches `dist[to]`.
fn enumerate_forward(
    graph: &Graph,
    dist: &[f64],
    from: Node,
    to: Node,
    length: &dyn Fn(Node, Node) -> f64,
) -> Vec<Path> {
    let n = graph.size();
    let target = dist[to];
    if target.is_infinite() {
        return Vec::new();
    }

    let mut paths: Vec<Vec<Path>> = vec![Vec::new(); n];
    let mut dist_to: Vec<Option<f64>> = vec![None; n];
    paths[to].push(Path::new(to));
    dist_to[to] = Some(0.0);

    let order = graph
        .nodes()
        // Nodes farther than the target can't lie on a path to it.
        .filter(|&i| i != to && dist[i] <= target + EPSILON)
        .sorted_by(|&a, &b| dist[b].total_cmp(&dist[a]));

    for i in order {
        let mut extended = Vec::new();

        for &j in graph.succs(i) {
            let Some(rest) = dist_to[j] else {
                continue;
            };

            let through = length(i, j) + rest;
            if dist_to[i].map_or(true, |current| through < current) {
                dist_to[i] = Some(through);
            }
            if (dist[i] + through - target).abs() < EPSILON {
                extended.extend(paths[j].iter().map(|path| path.prefixed(i)));
            }
        }

        paths[i] = extended;
    }

    std::mem::take(&mut paths[from])
}

/// Enumerates every shortest path from `from` to `to` given the distances `dist_to` towards `to`.
///
/// The mirror image of [`enumerate_forward`]: nodes are swept from the farthest from `to` to the
/// closest, growing paths that start at `from`.
fn enumerate_backward(
    graph: &Graph,
    dist_to: &[f64],
    from: Node,
    to: Node,
    length: &dyn Fn(Node, Node) -> f64,
) -> Vec<Path> {
    let n = graph.size();
    let target = dist_to[from];
    if target.is_infinite() {
        return Vec::new();
    }

    let mut paths: Vec<Vec<Path>> = vec![Vec::new(); n];
    let mut dist_from: Vec<Option<f64>> = vec![None; n];
    paths[from].push(Path::new(from));
    dist_from[from] = Some(0.0);

    let order = graph
        .nodes()
        .filter(|&i| i != from && dist_to[i] <= target + EPSILON)
        .sorted_by(|&a, &b| dist_to[b].total_cmp(&dist_to[a]));

    for i in order {
        let mut extended = Vec::new();

        for &j in graph.preds(i) {
            let Some(head) = dist_from[j] else {
                continue;
            };

            let through = head + length(j, i);
            if dist_from[i].map_or(true, |current| through < current) {
                dist_from[i] = Some(through);
            }
            if (through + dist_to[i] - target).abs() < EPSILON {
                extended.extend(paths[j].iter().map(|path| path.extended(i)));
            }
        }

        paths[i] = extended;
    }

    std::mem::take(&mut paths[to])
}
