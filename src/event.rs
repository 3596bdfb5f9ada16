//! Change notifications emitted by a [`Graph`](crate::graph::Graph).
//!
//! Every successful mutation is broadcast synchronously to the graph's subscribers, in
//! subscription order, before the mutating call returns. Caches built on top of a graph (shortest
//! paths, centrality scores) subscribe a [`StaleFlag`] and recompute lazily on their next read.

use std::{
    cell::Cell,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{edge::Edge, graph::Graph};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a graph instance, distinct for every graph (and every clone) ever created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GraphId(u64);

impl GraphId {
    pub(crate) fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A structural change to a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphEvent {
    EdgeAdded(Edge),
    EdgeRemoved(Edge),
    /// The whole recorded history was rolled back at once.
    Reset,
}

/// Receives the events of the graphs it is subscribed to.
///
/// Listeners must not mutate the graph they are reacting to.
pub trait GraphListener {
    /// Handles `event` emitted by the graph identified by `source`.
    ///
    /// Returning `false` drops the subscription.
    fn notify(&self, source: GraphId, event: &GraphEvent) -> bool;
}

/// A listener that only remembers whether its graph changed since the last check.
#[derive(Debug, Default)]
pub struct StaleFlag {
    graph: Cell<Option<GraphId>>,
    stale: Cell<bool>,
}

impl StaleFlag {
    /// Returns whether a change was observed and clears the flag.
    pub fn take(&self) -> bool {
        self.stale.replace(false)
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }
}

impl GraphListener for StaleFlag {
    fn notify(&self, source: GraphId, _event: &GraphEvent) -> bool {
        // Events from a graph we have since been rebound away from unsubscribe us from it.
        if self.graph.get() != Some(source) {
            return false;
        }

        self.stale.set(true);
        true
    }
}

/// Ties a cache to exactly one graph at a time.
///
/// Binding to a graph subscribes to its events; binding to a different graph moves the
/// subscription and reports that everything cached so far must be dropped.
#[derive(Debug, Default)]
pub struct Binding {
    flag: Rc<StaleFlag>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds to `graph` and returns whether the cached state is invalid, either because the
    /// binding changed or because the graph was mutated since the last call.
    pub fn refresh(&mut self, graph: &Graph) -> bool {
        let rebound = self.flag.graph.get() != Some(graph.id());

        if rebound {
            self.flag.graph.set(Some(graph.id()));
            graph.subscribe(self.flag.clone());
        }

        // Always consume the flag, a rebind supersedes any pending change.
        self.flag.take() || rebound
    }

    /// Detaches from `graph` if currently bound to it.
    pub fn release(&mut self, graph: &Graph) {
        if self.bound_to() == Some(graph.id()) {
            let listener: Rc<dyn GraphListener> = self.flag.clone();
            graph.unsubscribe(&listener);
            self.flag.graph.set(None);
            self.flag.take();
        }
    }

    /// Returns whether the bound graph changed since the last refresh, without consuming it.
    pub fn is_stale(&self) -> bool {
        self.flag.is_stale()
    }

    /// Returns the graph currently bound, if any.
    pub fn bound_to(&self) -> Option<GraphId> {
        self.flag.graph.get()
    }
}
