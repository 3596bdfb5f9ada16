//! A module for working with mutable graphs.
//!
//! A [`Graph`] has a fixed number of nodes, identified by the integers `0..n`, and a mutable set
//! of edges. Every successful edit is broadcast to the graph's subscribers (see
//! [`event`](crate::event)) and, while recording, logged so it can be rolled back.

use std::{
    cell::RefCell,
    collections::{BTreeSet, VecDeque},
    fmt,
    ops::Range,
    rc::{Rc, Weak},
};

use itertools::{iproduct, Either, Itertools};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    edge::Edge,
    error::{Error, Result},
    event::{GraphEvent, GraphId, GraphListener},
};

/// A node is identified by its index in `0..n`.
pub type Node = usize;

/// An ordered set of nodes.
pub type NodeSet = BTreeSet<Node>;

/// The kind of a recorded edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Addition,
    Removal,
}

/// A reversible edit recorded in the graph's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    pub source: Node,
    pub target: Node,
}

/// A graph with a fixed node count and a mutable, observable edge set.
#[derive(Debug)]
pub struct Graph {
    id: GraphId,
    name: String,
    /// The number of nodes.
    n: usize,
    /// The number of edges.
    m: usize,
    directed: bool,
    /// Successor sets, also the neighbourhoods when undirected.
    succs: Vec<NodeSet>,
    /// Predecessor sets, only maintained for directed graphs.
    preds: Option<Vec<NodeSet>>,
    /// The edit log, `None` when not recording.
    history: Option<Vec<Change>>,
    /// Subscribers in subscription order. The graph doesn't keep them alive.
    listeners: RefCell<Vec<Weak<dyn GraphListener>>>,
}

impl Graph {
    /// Creates an undirected graph with `n` nodes and no edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::graph::Graph;
    ///
    /// let graph = Graph::new(4);
    /// assert_eq!(graph.size(), 4);
    /// assert_eq!(graph.edge_count(), 0);
    /// ```
    pub fn new(n: usize) -> Self {
        Self::with_direction(n, false)
    }

    /// Creates a directed graph with `n` nodes and no edges.
    pub fn new_directed(n: usize) -> Self {
        Self::with_direction(n, true)
    }

    pub fn with_direction(n: usize, directed: bool) -> Self {
        Self {
            id: GraphId::next(),
            name: String::new(),
            n,
            m: 0,
            directed,
            succs: vec![NodeSet::new(); n],
            preds: directed.then(|| vec![NodeSet::new(); n]),
            history: None,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Sets the name of the graph.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds a graph from a list of `(source, target)` pairs.
    ///
    /// Duplicate pairs are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeOutOfRange`] if an endpoint isn't in `0..n` and [`Error::SelfLoop`]
    /// if a pair links a node to itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::graph::Graph;
    ///
    /// let graph = Graph::from_edges(3, false, [(0, 1), (1, 2)]).unwrap();
    /// assert!(graph.contains_edge(2, 1));
    ///
    /// assert!(Graph::from_edges(3, false, [(0, 3)]).is_err());
    /// ```
    pub fn from_edges(
        n: usize,
        directed: bool,
        edges: impl IntoIterator<Item = (Node, Node)>,
    ) -> Result<Self> {
        let mut graph = Self::with_direction(n, directed);

        for (source, target) in edges {
            for node in [source, target] {
                if node >= n {
                    return Err(Error::NodeOutOfRange { node, size: n });
                }
            }
            if source == target {
                return Err(Error::SelfLoop(source));
            }

            graph.add_edge(source, target);
        }

        Ok(graph)
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the number of nodes.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.m
    }

    /// Returns the number of node pairs that could still be linked.
    pub fn non_edge_count(&self) -> usize {
        self.possible_edge_count() - self.m
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Creates an edge carrying this graph's direction flag.
    pub fn edge(&self, source: Node, target: Node) -> Edge {
        Edge::with_direction(source, target, self.directed)
    }

    //
    // Mutations
    //

    /// Inserts the edge `(i, j)`, both ways when undirected.
    ///
    /// Returns `false` without touching the graph for self-loops, out of range nodes and edges
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::graph::Graph;
    ///
    /// let mut graph = Graph::new(3);
    ///
    /// assert_eq!(graph.add_edge(0, 1), true);
    /// assert_eq!(graph.add_edge(1, 0), false);
    /// assert_eq!(graph.add_edge(2, 2), false);
    /// ```
    pub fn add_edge(&mut self, i: Node, j: Node) -> bool {
        if i == j || j >= self.n || i >= self.n || self.contains_edge(i, j) {
            return false;
        }

        self.perform_add(i, j);
        self.record(ChangeKind::Addition, i, j);
        trace!(edge = %self.edge(i, j), "edge added");
        self.notify(GraphEvent::EdgeAdded(self.edge(i, j)));

        true
    }

    /// Removes the edge `(i, j)`, returns `false` if it isn't present.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::graph::Graph;
    ///
    /// let mut graph = Graph::new(3);
    /// graph.add_edge(0, 1);
    ///
    /// assert_eq!(graph.remove_edge(1, 0), true);
    /// assert_eq!(graph.remove_edge(0, 2), false);
    /// ```
    pub fn remove_edge(&mut self, i: Node, j: Node) -> bool {
        if i == j || !self.contains_edge(i, j) {
            return false;
        }

        self.perform_remove(i, j);
        self.record(ChangeKind::Removal, i, j);
        trace!(edge = %self.edge(i, j), "edge removed");
        self.notify(GraphEvent::EdgeRemoved(self.edge(i, j)));

        true
    }

    /// Toggles the presence of the edge `(i, j)`.
    pub fn swap_edge(&mut self, i: Node, j: Node) -> bool {
        if self.contains_edge(i, j) {
            self.remove_edge(i, j)
        } else {
            self.add_edge(i, j)
        }
    }

    pub fn add(&mut self, edge: &Edge) -> bool {
        self.add_edge(edge.source(), edge.target())
    }

    pub fn remove(&mut self, edge: &Edge) -> bool {
        self.remove_edge(edge.source(), edge.target())
    }

    pub fn swap(&mut self, edge: &Edge) -> bool {
        self.swap_edge(edge.source(), edge.target())
    }

    /// Removes every edge incident to `i`, each removal logged and notified on its own.
    pub fn disconnect_node(&mut self, i: Node) {
        if i >= self.n {
            return;
        }

        let succs: Vec<Node> = self.succs[i].iter().copied().collect();
        for j in succs {
            self.remove_edge(i, j);
        }

        if self.directed {
            let preds: Vec<Node> = self.preds(i).iter().copied().collect();
            for j in preds {
                self.remove_edge(j, i);
            }
        }
    }

    /// Returns a copy of the graph with `k` extra isolated nodes.
    ///
    /// The copy has no history and no subscribers.
    pub fn with_added_nodes(&self, k: usize) -> Self {
        let mut graph =
            Self::with_direction(self.n + k, self.directed).with_name(self.name.clone());
        for edge in self.edges() {
            graph.add(&edge);
        }

        graph
    }

    /// Links consecutive connected components, asking `choose` for an edge between each component
    /// and the previous one. Returns the edges that were added.
    pub fn force_connectivity<F>(&mut self, mut choose: F) -> Vec<Edge>
    where
        F: FnMut(&NodeSet, &NodeSet) -> Edge,
    {
        let mut added = Vec::new();
        let mut last: Option<NodeSet> = None;

        for component in self.connected_components(None) {
            if let Some(previous) = &last {
                let edge = choose(&component, previous);
                if self.add(&edge) {
                    added.push(edge);
                }
            }
            last = Some(component);
        }

        added
    }

    //
    // Queries
    //

    /// Checks if the graph contains the edge `(i, j)`.
    pub fn contains_edge(&self, i: Node, j: Node) -> bool {
        j < self.n && self.succs.get(i).is_some_and(|succs| succs.contains(&j))
    }

    /// Checks if the graph contains an edge.
    pub fn contains(&self, edge: &Edge) -> bool {
        self.contains_edge(edge.source(), edge.target())
    }

    /// Returns the nodes reachable from `i` through one edge.
    pub fn succs(&self, i: Node) -> &NodeSet {
        &self.succs[i]
    }

    /// Returns the nodes from which `i` is reachable through one edge.
    pub fn preds(&self, i: Node) -> &NodeSet {
        match &self.preds {
            Some(preds) => &preds[i],
            None => &self.succs[i],
        }
    }

    /// Returns the nodes adjacent to `i` in either direction.
    pub fn neighs(&self, i: Node) -> NodeSet {
        if self.directed {
            self.succs(i).union(self.preds(i)).copied().collect()
        } else {
            self.succs(i).clone()
        }
    }

    pub fn out_degree(&self, i: Node) -> usize {
        self.succs(i).len()
    }

    pub fn in_degree(&self, i: Node) -> usize {
        self.preds(i).len()
    }

    /// Returns the number of incident edges, counting both directions when directed.
    pub fn degree(&self, i: Node) -> usize {
        if self.directed {
            self.out_degree(i) + self.in_degree(i)
        } else {
            self.out_degree(i)
        }
    }

    pub fn average_degree(&self) -> f64 {
        self.nodes().map(|i| self.degree(i) as f64).sum::<f64>() / self.n as f64
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use wraith::graph::Graph;
    ///
    /// let mut graph = Graph::new(3);
    ///
    /// graph.add_edge(0, 1);
    /// assert_eq!(graph.density(), 1.0 / 3.0);
    ///
    /// graph.add_edge(0, 2);
    /// assert_eq!(graph.density(), 2.0 / 3.0);
    /// ```
    pub fn density(&self) -> f64 {
        self.m as f64 / self.possible_edge_count() as f64
    }

    pub fn nodes(&self) -> Range<Node> {
        0..self.n
    }

    /// Iterates over the edges, yielding each undirected edge once as `(i, j)` with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.succs.iter().enumerate().flat_map(move |(i, succs)| {
            succs
                .iter()
                .filter(move |&&j| self.directed || i < j)
                .map(move |&j| self.edge(i, j))
        })
    }

    /// Iterates over the node pairs that aren't linked.
    pub fn non_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let pairs = if self.directed {
            Either::Left(iproduct!(self.nodes(), self.nodes()).filter(|(i, j)| i != j))
        } else {
            Either::Right(self.nodes().tuple_combinations::<(Node, Node)>())
        };

        pairs
            .filter(move |&(i, j)| !self.contains_edge(i, j))
            .map(move |(i, j)| self.edge(i, j))
    }

    /// Constructs the adjacency matrix for this graph, `a[(i, j)] = 1` for every edge `i -> j`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use wraith::graph::Graph;
    ///
    /// let mut graph = Graph::new(2);
    /// graph.add_edge(0, 1);
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 1.0;
    ///              1.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let mut matrix = DMatrix::<f64>::zeros(self.n, self.n);

        for (i, succs) in self.succs.iter().enumerate() {
            for &j in succs {
                matrix[(i, j)] = 1.0;
            }
        }

        matrix
    }

    /// Returns every connected component (weakly connected when directed), optionally restricted
    /// to the `allowed` nodes.
    pub fn connected_components(&self, allowed: Option<&NodeSet>) -> Vec<NodeSet> {
        let mut rest: NodeSet = match allowed {
            Some(allowed) => allowed.clone(),
            None => self.nodes().collect(),
        };
        let mut components = Vec::new();

        while let Some(&start) = rest.first() {
            let component = self.connected_component(start, allowed);
            rest.retain(|node| !component.contains(node));
            components.push(component);
        }

        components
    }

    /// Returns the nodes connected to `v`, only walking through `allowed` nodes if given.
    ///
    /// Edges are followed in both directions when the graph is directed.
    pub fn connected_component(&self, v: Node, allowed: Option<&NodeSet>) -> NodeSet {
        let mut component = NodeSet::new();
        let mut queue = VecDeque::from([v]);
        component.insert(v);

        let permitted = |node: &Node| allowed.map_or(true, |allowed| allowed.contains(node));

        while let Some(i) = queue.pop_front() {
            let neighbours = if self.directed {
                Either::Left(self.succs(i).iter().chain(self.preds(i)))
            } else {
                Either::Right(self.succs(i).iter())
            };

            for &j in neighbours {
                if permitted(&j) && component.insert(j) {
                    queue.push_back(j);
                }
            }
        }

        component
    }

    /// Returns the subgraph induced by `nodes`, relabelled to `0..nodes.len()` in ascending order.
    pub fn induced_graph(&self, nodes: &NodeSet) -> InducedGraph {
        let labels: Vec<Node> = nodes.iter().copied().filter(|&i| i < self.n).collect();
        let mut graph = Self::with_direction(labels.len(), self.directed)
            .with_name(format!("induced({})", self.name));

        for (a, &i) in labels.iter().enumerate() {
            for &j in self.succs(i) {
                if self.directed || i < j {
                    // Labels are sorted, so a binary search maps back to the new index.
                    if let Ok(b) = labels.binary_search(&j) {
                        graph.add_edge(a, b);
                    }
                }
            }
        }

        InducedGraph { graph, labels }
    }

    /// Returns the subgraph induced by the nodes satisfying `predicate`.
    pub fn induced_graph_by(&self, predicate: impl Fn(Node) -> bool) -> InducedGraph {
        let nodes: NodeSet = self.nodes().filter(|&i| predicate(i)).collect();
        self.induced_graph(&nodes)
    }

    //
    // Subscriptions
    //

    /// Registers `listener` for this graph's events, moving it to the back if already present.
    ///
    /// Only a weak reference is kept: dropping the listener ends the subscription.
    pub fn subscribe(&self, listener: Rc<dyn GraphListener>) {
        self.unsubscribe(&listener);
        self.listeners.borrow_mut().push(Rc::downgrade(&listener));
    }

    pub fn unsubscribe(&self, listener: &Rc<dyn GraphListener>) {
        let target = Rc::as_ptr(listener) as *const ();
        self.listeners
            .borrow_mut()
            .retain(|weak| weak.strong_count() > 0 && weak.as_ptr() as *const () != target);
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    //
    // History
    //

    /// Starts logging edits, discarding any previous log.
    pub fn start_recording_history(&mut self) {
        self.history = Some(Vec::new());
    }

    /// Stops logging edits and discards the log.
    pub fn stop_recording_history(&mut self) {
        self.history = None;
    }

    pub fn is_recording_history(&self) -> bool {
        self.history.is_some()
    }

    pub fn history_size(&self) -> usize {
        self.history.as_ref().map_or(0, Vec::len)
    }

    /// Returns the edge touched by the most recent recorded edit.
    pub fn last_change(&self) -> Option<Edge> {
        self.history
            .as_ref()
            .and_then(|history| history.last())
            .map(|change| self.edge(change.source, change.target))
    }

    /// Iterates over the recorded edits, oldest first.
    pub fn changes(&self) -> impl Iterator<Item = &Change> {
        self.history.iter().flatten()
    }

    /// Rolls back every recorded edit, restoring the edge set from when recording started.
    ///
    /// Subscribers receive a single [`GraphEvent::Reset`] rather than one event per edit. Does
    /// nothing when not recording.
    pub fn reset_graph(&mut self) {
        let Some(history) = self.history.take() else {
            return;
        };

        trace!(changes = history.len(), "resetting graph");
        for change in history.iter().rev() {
            self.revert(change);
        }

        self.history = Some(Vec::new());
        self.notify(GraphEvent::Reset);
    }

    /// Rolls back the `k` most recent edits (fewer if the log is shorter), notifying each reverted
    /// edit as its inverse. Returns the number of edits rolled back.
    pub fn revert_changes(&mut self, k: usize) -> usize {
        let mut reverted = 0;

        while reverted < k {
            let Some(change) = self.history.as_mut().and_then(Vec::pop) else {
                break;
            };

            self.revert(&change);
            let edge = self.edge(change.source, change.target);
            trace!(%edge, kind = ?change.kind, "change reverted");
            self.notify(match change.kind {
                ChangeKind::Addition => GraphEvent::EdgeRemoved(edge),
                ChangeKind::Removal => GraphEvent::EdgeAdded(edge),
            });

            reverted += 1;
        }

        reverted
    }

    //
    // Private
    //

    fn possible_edge_count(&self) -> usize {
        let pairs = self.n * self.n.saturating_sub(1);
        if self.directed {
            pairs
        } else {
            pairs / 2
        }
    }

    fn perform_add(&mut self, i: Node, j: Node) {
        self.succs[i].insert(j);
        match &mut self.preds {
            Some(preds) => preds[j].insert(i),
            None => self.succs[j].insert(i),
        };
        self.m += 1;
    }

    fn perform_remove(&mut self, i: Node, j: Node) {
        self.succs[i].remove(&j);
        match &mut self.preds {
            Some(preds) => preds[j].remove(&i),
            None => self.succs[j].remove(&i),
        };
        self.m -= 1;
    }

    /// Undoes a change without logging or notifying.
    fn revert(&mut self, change: &Change) {
        match change.kind {
            ChangeKind::Addition => self.perform_remove(change.source, change.target),
            ChangeKind::Removal => self.perform_add(change.source, change.target),
        }
    }

    fn record(&mut self, kind: ChangeKind, source: Node, target: Node) {
        if let Some(history) = &mut self.history {
            history.push(Change {
                kind,
                source,
                target,
            });
        }
    }

    /// Delivers `event` to every live subscriber, in subscription order.
    fn notify(&self, event: GraphEvent) {
        let id = self.id;
        self.listeners
            .borrow_mut()
            .retain(|weak| match weak.upgrade() {
                Some(listener) => listener.notify(id, &event),
                None => false,
            });
    }
}

/// Clones the edge set into an independent graph with a fresh identity, no history and no
/// subscribers.
impl Clone for Graph {
    fn clone(&self) -> Self {
        Self {
            id: GraphId::next(),
            name: self.name.clone(),
            n: self.n,
            m: self.m,
            directed: self.directed,
            succs: self.succs.clone(),
            preds: self.preds.clone(),
            history: None,
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},n={},m={}", self.name, self.n, self.m)?;
        if self.directed {
            write!(f, ",directed")?;
        }
        write!(f, ")")
    }
}

/// A subgraph together with the original label of each of its nodes.
#[derive(Debug, Clone)]
pub struct InducedGraph {
    pub graph: Graph,
    /// `labels[i]` is the node of the original graph that `i` stands for.
    pub labels: Vec<Node>,
}

impl InducedGraph {
    pub fn label(&self, i: Node) -> Option<Node> {
        self.labels.get(i).copied()
    }

    /// Maps a node of the original graph to its index in the subgraph.
    pub fn index_of(&self, original: Node) -> Option<Node> {
        self.labels.binary_search(&original).ok()
    }
}

/// A serializable description of a graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    #[serde(default)]
    pub name: String,
    pub size: usize,
    #[serde(default)]
    pub directed: bool,
    pub edges: Vec<(Node, Node)>,
}

impl TryFrom<GraphSpec> for Graph {
    type Error = Error;

    fn try_from(spec: GraphSpec) -> Result<Self> {
        Ok(Graph::from_edges(spec.size, spec.directed, spec.edges)?.with_name(spec.name))
    }
}

impl From<&Graph> for GraphSpec {
    fn from(graph: &Graph) -> Self {
        Self {
            name: graph.name.clone(),
            size: graph.n,
            directed: graph.directed,
            edges: graph
                .edges()
                .map(|edge| (edge.source(), edge.target()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records every event it receives.
    #[derive(Default)]
    struct EventLog {
        events: RefCell<Vec<GraphEvent>>,
    }

    impl GraphListener for EventLog {
        fn notify(&self, _source: GraphId, event: &GraphEvent) -> bool {
            self.events.borrow_mut().push(*event);
            true
        }
    }

    fn subscribed_log(graph: &Graph) -> Rc<EventLog> {
        let log = Rc::new(EventLog::default());
        graph.subscribe(log.clone());
        log
    }

    #[test]
    fn new() {
        let graph = Graph::new(5);
        assert_eq!(graph.size(), 5);
        assert!(!graph.is_directed());

        let graph = Graph::new_directed(2);
        assert!(graph.is_directed());
    }

    #[test]
    fn from_edges() {
        let graph = Graph::from_edges(4, true, [(0, 1), (1, 2), (0, 1)]).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(1, 2));
        assert!(!graph.contains_edge(2, 1));

        assert_eq!(
            Graph::from_edges(2, false, [(0, 5)]).unwrap_err(),
            Error::NodeOutOfRange { node: 5, size: 2 }
        );
        assert_eq!(
            Graph::from_edges(2, false, [(1, 1)]).unwrap_err(),
            Error::SelfLoop(1)
        );
    }

    #[test]
    fn add_edge() {
        let mut graph = Graph::new(3);

        assert!(graph.add_edge(0, 1));
        assert!(!graph.add_edge(0, 1));
        assert!(!graph.add_edge(1, 0));
        assert!(!graph.add_edge(2, 2));
        assert!(!graph.add_edge(0, 3));

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge(1, 0));
    }

    #[test]
    fn add_directed_edge() {
        let mut graph = Graph::new_directed(3);

        assert!(graph.add_edge(0, 1));
        assert!(graph.add_edge(1, 0));
        assert_eq!(graph.edge_count(), 2);

        assert_eq!(graph.succs(0), &NodeSet::from([1]));
        assert_eq!(graph.preds(1), &NodeSet::from([0]));
        assert_eq!(graph.degree(0), 2);
    }

    #[test]
    fn remove_edge() {
        let mut graph = graph!(3; [0, 1, 2]);

        assert!(graph.remove_edge(2, 1));
        assert!(!graph.remove_edge(2, 1));
        assert!(!graph.remove_edge(0, 0));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.succs(2).is_empty());
    }

    #[test]
    fn swap_edge() {
        let mut graph = Graph::new(2);
        let log = subscribed_log(&graph);

        assert!(graph.swap_edge(0, 1));
        assert!(graph.contains_edge(0, 1));
        assert!(graph.swap_edge(1, 0));
        assert!(!graph.contains_edge(0, 1));

        assert_eq!(
            *log.events.borrow(),
            vec![
                GraphEvent::EdgeAdded(Edge::new(0, 1)),
                GraphEvent::EdgeRemoved(Edge::new(1, 0)),
            ]
        );
    }

    #[test]
    fn disconnect_node() {
        let mut graph = Graph::new_directed(4);
        graph.add_edge(0, 1);
        graph.add_edge(2, 0);
        graph.add_edge(3, 0);
        graph.add_edge(2, 3);
        graph.start_recording_history();
        let log = subscribed_log(&graph);

        graph.disconnect_node(0);

        assert_eq!(graph.degree(0), 0);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.history_size(), 3);
        assert_eq!(log.events.borrow().len(), 3);
    }

    #[test]
    fn neighs() {
        let mut graph = Graph::new_directed(3);
        graph.add_edge(0, 1);
        graph.add_edge(2, 0);

        assert_eq!(graph.neighs(0), NodeSet::from([1, 2]));
        assert_eq!(graph.out_degree(0), 1);
        assert_eq!(graph.in_degree(0), 1);
    }

    #[test]
    fn edges() {
        let graph = graph!(4; [0, 1, 2], [3, 1]);
        let edges: Vec<Edge> = graph.edges().collect();

        assert_eq!(edges, vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(1, 3)]);
    }

    #[test]
    fn non_edges() {
        let graph = graph!(3; [0, 1]);
        assert_eq!(graph.non_edge_count(), 2);
        assert_eq!(
            graph.non_edges().collect::<Vec<_>>(),
            vec![Edge::new(0, 2), Edge::new(1, 2)]
        );

        let mut graph = Graph::new_directed(2);
        graph.add_edge(0, 1);
        assert_eq!(graph.non_edge_count(), 1);
        assert_eq!(
            graph.non_edges().collect::<Vec<_>>(),
            vec![Edge::directed(1, 0)]
        );
    }

    #[test]
    fn density() {
        let graph = Graph::new(1);
        assert!(graph.density().is_nan());

        let graph = graph!(3; [0, 1, 2, 0]);
        assert_eq!(graph.density(), 1.0);
        assert_eq!(graph.average_degree(), 2.0);
    }

    #[test]
    fn with_added_nodes() {
        let mut graph = graph!(3; [0, 1, 2]).with_name("line");
        graph.start_recording_history();
        let log = subscribed_log(&graph);

        let grown = graph.with_added_nodes(2);

        assert_eq!(grown.size(), 5);
        assert_eq!(grown.edge_count(), 2);
        assert_eq!(grown.name(), "line");
        assert!(!grown.is_recording_history());
        assert_eq!(grown.subscriber_count(), 0);
        assert!(log.events.borrow().is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let mut graph = graph!(3; [0, 1]);
        let log = subscribed_log(&graph);

        let mut copy = graph.clone();
        assert_ne!(copy.id(), graph.id());
        assert_eq!(copy.subscriber_count(), 0);

        copy.add_edge(1, 2);
        assert!(!graph.contains_edge(1, 2));
        assert!(log.events.borrow().is_empty());

        graph.add_edge(0, 2);
        assert!(!copy.contains_edge(0, 2));
        assert_eq!(log.events.borrow().len(), 1);
    }

    #[test]
    fn subscribers_are_notified_in_order() {
        struct Tagged {
            tag: usize,
            seen: Rc<RefCell<Vec<usize>>>,
        }

        impl GraphListener for Tagged {
            fn notify(&self, _source: GraphId, _event: &GraphEvent) -> bool {
                self.seen.borrow_mut().push(self.tag);
                true
            }
        }

        let mut graph = Graph::new(2);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let listeners: Vec<Rc<Tagged>> = (0..3)
            .map(|tag| {
                Rc::new(Tagged {
                    tag,
                    seen: seen.clone(),
                })
            })
            .collect();
        for listener in &listeners {
            graph.subscribe(listener.clone());
        }

        graph.add_edge(0, 1);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn subscribe_deduplicates() {
        let graph = Graph::new(2);
        let log: Rc<dyn GraphListener> = Rc::new(EventLog::default());

        graph.subscribe(log.clone());
        graph.subscribe(log.clone());
        assert_eq!(graph.subscriber_count(), 1);

        graph.unsubscribe(&log);
        assert_eq!(graph.subscriber_count(), 0);
    }

    #[test]
    fn dropped_listeners_are_pruned() {
        let mut graph = Graph::new(2);
        let log = subscribed_log(&graph);
        drop(log);

        assert_eq!(graph.subscriber_count(), 0);
        assert!(graph.add_edge(0, 1));
    }

    #[test]
    fn rejected_mutations_are_silent() {
        let mut graph = graph!(2; [0, 1]);
        graph.start_recording_history();
        let log = subscribed_log(&graph);

        assert!(!graph.add_edge(0, 1));
        assert!(!graph.remove_edge(0, 0));

        assert!(log.events.borrow().is_empty());
        assert_eq!(graph.history_size(), 0);
    }

    #[test]
    fn history() {
        let mut graph = Graph::new(3);
        assert!(!graph.is_recording_history());

        // Edits before recording starts are not logged.
        graph.add_edge(0, 1);
        graph.start_recording_history();
        assert_eq!(graph.history_size(), 0);

        graph.add_edge(1, 2);
        graph.remove_edge(0, 1);

        assert_eq!(graph.history_size(), 2);
        assert_eq!(graph.last_change(), Some(Edge::new(0, 1)));
        assert_eq!(
            graph.changes().map(|change| change.kind).collect::<Vec<_>>(),
            vec![ChangeKind::Addition, ChangeKind::Removal]
        );

        graph.stop_recording_history();
        assert_eq!(graph.history_size(), 0);
        assert_eq!(graph.last_change(), None);
    }

    #[test]
    fn reset_graph() {
        let mut graph = graph!(4; [0, 1, 2]);
        graph.start_recording_history();
        let log = subscribed_log(&graph);

        graph.add_edge(2, 3);
        graph.remove_edge(0, 1);
        graph.swap_edge(0, 3);
        graph.disconnect_node(2);
        log.events.borrow_mut().clear();

        graph.reset_graph();

        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![Edge::new(0, 1), Edge::new(1, 2)]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.history_size(), 0);
        assert!(graph.is_recording_history());
        assert_eq!(*log.events.borrow(), vec![GraphEvent::Reset]);
    }

    #[test]
    fn reset_graph_without_recording() {
        let mut graph = graph!(3; [0, 1]);
        let log = subscribed_log(&graph);

        graph.add_edge(1, 2);
        log.events.borrow_mut().clear();
        graph.reset_graph();

        assert!(graph.contains_edge(1, 2));
        assert!(log.events.borrow().is_empty());
    }

    #[test]
    fn revert_changes() {
        let mut graph = graph!(4; [0, 1]);
        graph.start_recording_history();
        let log = subscribed_log(&graph);

        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.remove_edge(0, 1);
        log.events.borrow_mut().clear();

        assert_eq!(graph.revert_changes(2), 2);
        assert!(graph.contains_edge(0, 1));
        assert!(!graph.contains_edge(2, 3));
        assert!(graph.contains_edge(1, 2));
        assert_eq!(
            *log.events.borrow(),
            vec![
                GraphEvent::EdgeAdded(Edge::new(0, 1)),
                GraphEvent::EdgeRemoved(Edge::new(2, 3)),
            ]
        );

        // Over-requesting clamps to what's left.
        assert_eq!(graph.revert_changes(10), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![Edge::new(0, 1)]);
        assert_eq!(graph.revert_changes(1), 0);
    }

    #[test]
    fn connected_components() {
        let graph = graph!(6; [0, 1, 2], [3, 4]);
        let components = graph.connected_components(None);

        assert_eq!(
            components,
            vec![
                NodeSet::from([0, 1, 2]),
                NodeSet::from([3, 4]),
                NodeSet::from([5]),
            ]
        );

        // Removing node 1 from the allowed set splits the first component.
        let allowed = NodeSet::from([0, 2, 3, 4]);
        assert_eq!(
            graph.connected_components(Some(&allowed)),
            vec![NodeSet::from([0]), NodeSet::from([2]), NodeSet::from([3, 4])]
        );
    }

    #[test]
    fn directed_components_are_weak() {
        let mut graph = Graph::new_directed(3);
        graph.add_edge(1, 0);
        graph.add_edge(1, 2);

        assert_eq!(graph.connected_component(0, None), NodeSet::from([0, 1, 2]));
    }

    #[test]
    fn induced_graph() {
        let graph = graph!(5; [0, 1, 2, 3, 4], [0, 4]).with_name("cycle");
        let induced = graph.induced_graph(&NodeSet::from([0, 1, 4]));

        assert_eq!(induced.graph.size(), 3);
        assert_eq!(induced.graph.name(), "induced(cycle)");
        assert_eq!(induced.labels, vec![0, 1, 4]);
        assert_eq!(
            induced.graph.edges().collect::<Vec<_>>(),
            vec![Edge::new(0, 1), Edge::new(0, 2)]
        );
        assert_eq!(induced.label(2), Some(4));
        assert_eq!(induced.index_of(4), Some(2));
        assert_eq!(induced.index_of(3), None);

        let evens = graph.induced_graph_by(|i| i % 2 == 0);
        assert_eq!(evens.labels, vec![0, 2, 4]);
        assert_eq!(evens.graph.edge_count(), 1);
    }

    #[test]
    fn force_connectivity() {
        let mut graph = graph!(5; [0, 1], [2, 3]);

        let added = graph.force_connectivity(|component, previous| {
            Edge::new(*component.first().unwrap(), *previous.first().unwrap())
        });

        assert_eq!(added, vec![Edge::new(2, 0), Edge::new(4, 2)]);
        assert_eq!(graph.connected_components(None).len(), 1);
    }

    #[test]
    fn adjacency_matrix() {
        use nalgebra::dmatrix;

        let mut graph = Graph::new_directed(3);
        graph.add_edge(0, 1);
        graph.add_edge(2, 0);

        assert_eq!(
            graph.adjacency_matrix(),
            dmatrix![0.0, 1.0, 0.0;
                     0.0, 0.0, 0.0;
                     1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn display() {
        let graph = graph!(3; [0, 1]).with_name("g");
        assert_eq!(graph.to_string(), "(g,n=3,m=1)");

        let graph = Graph::new_directed(2).with_name("d");
        assert_eq!(graph.to_string(), "(d,n=2,m=0,directed)");
    }

    #[test]
    fn graph_spec() {
        let graph = graph!(3; [2, 1, 0]).with_name("spec");
        let spec = GraphSpec::from(&graph);

        assert_eq!(spec.edges, vec![(0, 1), (1, 2)]);

        let rebuilt = Graph::try_from(spec).unwrap();
        assert_eq!(rebuilt.name(), "spec");
        assert_eq!(rebuilt.edges().collect::<Vec<_>>(), graph.edges().collect::<Vec<_>>());
    }
}
