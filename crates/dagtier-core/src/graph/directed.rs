//! Immutable graph snapshots and their shared query surface.
//!
//! [`DirectedGraph`] stores the frozen arrows in a petgraph
//! [`DiGraph`] together with an element → [`NodeIndex`] lookup map. Node
//! indices follow element insertion order, which is what
//! [`GraphView::elements`] enumerates.
//!
//! [`Dag`] wraps a [`DirectedGraph`] and adds the capabilities that only make
//! sense without cycles (reachability, transitive reduction). There is no
//! mutation API on either type; both are `Send + Sync` whenever the element
//! type is.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::element::Element;
use crate::error::GraphError;
use crate::graph::reduce::{descendants, transitive_reduction};

// ---------------------------------------------------------------------------
// GraphView
// ---------------------------------------------------------------------------

/// Read-only query surface shared by [`DirectedGraph`] and [`Dag`].
///
/// Implementors provide the backing petgraph and the element lookup; every
/// other query is derived from those two.
pub trait GraphView<T: Element> {
    /// The backing petgraph. Node indices follow element insertion order.
    fn as_petgraph(&self) -> &DiGraph<T, ()>;

    /// The petgraph node index of `element`, if it is a member.
    fn node_index(&self, element: &T) -> Option<NodeIndex>;

    /// All elements in original insertion order.
    ///
    /// Call again to restart the enumeration.
    fn elements<'a>(&'a self) -> impl ExactSizeIterator<Item = &'a T> + Clone
    where
        T: 'a,
    {
        self.as_petgraph()
            .raw_nodes()
            .iter()
            .map(|node| &node.weight)
    }

    /// Number of elements.
    #[must_use]
    fn count(&self) -> usize {
        self.as_petgraph().node_count()
    }

    /// Number of arrows.
    #[must_use]
    fn edge_count(&self) -> usize {
        self.as_petgraph().edge_count()
    }

    /// Returns `true` if `element` is a member.
    #[must_use]
    fn contains(&self, element: &T) -> bool {
        self.node_index(element).is_some()
    }

    /// Returns `true` if the arrow `from → to` is present.
    #[must_use]
    fn has_arrow(&self, from: &T, to: &T) -> bool {
        match (self.node_index(from), self.node_index(to)) {
            (Some(a), Some(b)) => self.as_petgraph().contains_edge(a, b),
            _ => false,
        }
    }

    /// All arrows as `(from, to)` pairs, grouped by source in insertion order.
    fn arrows<'a>(&'a self) -> impl Iterator<Item = (&'a T, &'a T)>
    where
        T: 'a,
    {
        let graph = self.as_petgraph();
        graph
            .edge_references()
            .map(move |edge| (&graph[edge.source()], &graph[edge.target()]))
    }

    /// Direct successors of `element`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownElement`] if `element` is not a member.
    fn direct_successors_of(&self, element: &T) -> Result<Vec<&T>, GraphError> {
        let idx = self
            .node_index(element)
            .ok_or_else(|| GraphError::unknown(element))?;
        Ok(neighbors_in_order(self.as_petgraph(), idx, Direction::Outgoing))
    }

    /// Direct predecessors of `element`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownElement`] if `element` is not a member.
    fn direct_predecessors_of(&self, element: &T) -> Result<Vec<&T>, GraphError> {
        let idx = self
            .node_index(element)
            .ok_or_else(|| GraphError::unknown(element))?;
        Ok(neighbors_in_order(self.as_petgraph(), idx, Direction::Incoming))
    }

    /// Elements with no predecessors, in insertion order.
    #[must_use]
    fn sources(&self) -> Vec<&T> {
        without_neighbors(self.as_petgraph(), Direction::Incoming)
    }

    /// Elements with no successors, in insertion order.
    #[must_use]
    fn sinks(&self) -> Vec<&T> {
        without_neighbors(self.as_petgraph(), Direction::Outgoing)
    }
}

fn neighbors_in_order<T>(graph: &DiGraph<T, ()>, idx: NodeIndex, dir: Direction) -> Vec<&T> {
    // petgraph yields neighbors newest-edge first.
    let mut neighbors: Vec<NodeIndex> = graph.neighbors_directed(idx, dir).collect();
    neighbors.sort_unstable();
    neighbors.into_iter().map(|n| &graph[n]).collect()
}

fn without_neighbors<T>(graph: &DiGraph<T, ()>, dir: Direction) -> Vec<&T> {
    graph
        .node_indices()
        .filter(|&idx| graph.neighbors_directed(idx, dir).next().is_none())
        .map(|idx| &graph[idx])
        .collect()
}

// ---------------------------------------------------------------------------
// DirectedGraph
// ---------------------------------------------------------------------------

/// An immutable directed graph snapshot. May contain cycles.
///
/// Equality compares element and arrow sets; insertion order is ignored.
#[derive(Debug, Clone)]
pub struct DirectedGraph<T: Element> {
    graph: DiGraph<T, ()>,
    node_map: HashMap<T, NodeIndex>,
}

impl<T: Element> DirectedGraph<T> {
    /// Wrap a petgraph whose node weights are pairwise distinct and whose
    /// edges contain no parallel pair and no self-loop.
    pub(crate) fn from_petgraph(graph: DiGraph<T, ()>) -> Self {
        let node_map = graph
            .node_indices()
            .map(|idx| (graph[idx].clone(), idx))
            .collect();
        Self { graph, node_map }
    }
}

impl<T: Element> GraphView<T> for DirectedGraph<T> {
    fn as_petgraph(&self) -> &DiGraph<T, ()> {
        &self.graph
    }

    fn node_index(&self, element: &T) -> Option<NodeIndex> {
        self.node_map.get(element).copied()
    }
}

impl<T: Element> PartialEq for DirectedGraph<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count()
            && self.edge_count() == other.edge_count()
            && self.elements().all(|e| other.contains(e))
            && self.arrows().all(|(from, to)| other.has_arrow(from, to))
    }
}

impl<T: Element> Eq for DirectedGraph<T> {}

// ---------------------------------------------------------------------------
// Dag
// ---------------------------------------------------------------------------

/// An immutable directed graph whose arrows contain no directed cycle.
///
/// Obtained from [`crate::GraphBuilder::create_acyclic_graph`] (validated)
/// or [`crate::GraphBuilder::create_acyclic_graph_unchecked`] (caller
/// vouches). Exposes everything a [`DirectedGraph`] does through
/// [`GraphView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dag<T: Element> {
    graph: DirectedGraph<T>,
}

impl<T: Element> Dag<T> {
    pub(crate) const fn from_graph_unchecked(graph: DirectedGraph<T>) -> Self {
        Self { graph }
    }

    /// Borrow the snapshot without the acyclicity capability.
    #[must_use]
    pub const fn as_graph(&self) -> &DirectedGraph<T> {
        &self.graph
    }

    /// Drop the acyclicity capability.
    #[must_use]
    pub fn into_graph(self) -> DirectedGraph<T> {
        self.graph
    }

    /// `element` and every element reachable from it, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownElement`] if `element` is not a member.
    pub fn reachable_from(&self, element: &T) -> Result<Vec<&T>, GraphError> {
        let start = self
            .node_index(element)
            .ok_or_else(|| GraphError::unknown(element))?;
        let graph = self.as_petgraph();
        Ok(descendants(graph, start)
            .ones()
            .map(|i| &graph[NodeIndex::new(i)])
            .collect())
    }

    /// Returns `true` if a path (possibly empty) leads from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownElement`] if either element is not a member.
    pub fn is_reachable(&self, from: &T, to: &T) -> Result<bool, GraphError> {
        let start = self
            .node_index(from)
            .ok_or_else(|| GraphError::unknown(from))?;
        let target = self.node_index(to).ok_or_else(|| GraphError::unknown(to))?;
        Ok(descendants(self.as_petgraph(), start).contains(target.index()))
    }

    /// A new DAG with every arrow implied by a longer path removed.
    #[must_use]
    pub fn transitive_reduction(&self) -> Self {
        transitive_reduction(self)
    }
}

impl<T: Element> GraphView<T> for Dag<T> {
    fn as_petgraph(&self) -> &DiGraph<T, ()> {
        self.graph.as_petgraph()
    }

    fn node_index(&self, element: &T) -> Option<NodeIndex> {
        self.graph.node_index(element)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
