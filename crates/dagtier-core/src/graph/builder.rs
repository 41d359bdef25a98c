//! Mutable staging area for graph elements and arrows.
//!
//! The builder keeps two insertion-ordered adjacency maps (successors and
//! predecessors) keyed by element. Every element is a key of both maps from
//! the moment it is added, so `b ∈ successors[a]` iff `a ∈ predecessors[b]`
//! holds after each successful mutation. Failed mutations leave the builder
//! untouched.
//!
//! Freezing copies the maps into a petgraph `DiGraph` whose node indices
//! follow element insertion order.

use indexmap::{IndexMap, IndexSet};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument, warn};

use crate::element::{Element, describe};
use crate::error::GraphError;
use crate::graph::cycles::find_cycle;
use crate::graph::directed::{Dag, DirectedGraph, GraphView};

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Staging structure for a directed graph.
///
/// Methods that add to the builder return `&mut Self` so calls chain:
///
/// ```rust
/// use dagtier_core::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_element(1)?.add_element(2)?.add_arrow(1, 2)?;
/// assert_eq!(builder.arrow_count(), 1);
/// # Ok::<(), dagtier_core::GraphError>(())
/// ```
///
/// Not synchronized; wrap it in a lock to mutate from several threads.
#[derive(Debug, Clone)]
pub struct GraphBuilder<T: Element> {
    successors: IndexMap<T, IndexSet<T>>,
    predecessors: IndexMap<T, IndexSet<T>>,
}

impl<T: Element> Default for GraphBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> GraphBuilder<T> {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            successors: IndexMap::new(),
            predecessors: IndexMap::new(),
        }
    }

    /// Create an empty builder with room for `elements` elements.
    #[must_use]
    pub fn with_capacity(elements: usize) -> Self {
        Self {
            successors: IndexMap::with_capacity(elements),
            predecessors: IndexMap::with_capacity(elements),
        }
    }

    /// Create a builder holding every element and arrow of `graph`.
    ///
    /// Elements keep their original insertion order.
    #[must_use]
    pub fn from_existing_graph<G: GraphView<T>>(graph: &G) -> Self {
        let mut builder = Self::with_capacity(graph.count());
        for element in graph.elements() {
            builder.register(element.clone());
        }
        for (from, to) in graph.arrows() {
            builder.link(from.clone(), to.clone());
        }
        builder
    }

    /// Number of staged elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    /// Returns `true` if no element has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// Returns `true` if `element` has been added.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.successors.contains_key(element)
    }

    /// Number of staged arrows.
    #[must_use]
    pub fn arrow_count(&self) -> usize {
        self.successors.values().map(IndexSet::len).sum()
    }

    /// Add an element with no arrows.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateElement`] if `element` was already added.
    pub fn add_element(&mut self, element: T) -> Result<&mut Self, GraphError> {
        if self.contains(&element) {
            return Err(GraphError::DuplicateElement(describe(&element)));
        }
        self.register(element);
        Ok(self)
    }

    /// Add an element that may be missing in the caller's data.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NullElement`] for `None`, otherwise behaves like
    /// [`GraphBuilder::add_element`].
    pub fn try_add_element(&mut self, element: Option<T>) -> Result<&mut Self, GraphError> {
        let element = element.ok_or(GraphError::NullElement)?;
        self.add_element(element)
    }

    /// Add the arrow `from → to`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownElement`] if either endpoint was never added.
    /// - [`GraphError::SelfArrow`] if `from == to`.
    /// - [`GraphError::DuplicateArrow`] if the ordered pair was already added.
    pub fn add_arrow(&mut self, from: T, to: T) -> Result<&mut Self, GraphError> {
        let Some(targets) = self.successors.get(&from) else {
            return Err(GraphError::unknown(&from));
        };
        if !self.successors.contains_key(&to) {
            return Err(GraphError::unknown(&to));
        }
        if from == to {
            return Err(GraphError::SelfArrow(describe(&from)));
        }
        if targets.contains(&to) {
            return Err(GraphError::DuplicateArrow {
                from: describe(&from),
                to: describe(&to),
            });
        }
        self.link(from, to);
        Ok(self)
    }

    /// Add an arrow whose endpoints may be missing in the caller's data.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NullElement`] if either endpoint is `None`,
    /// otherwise behaves like [`GraphBuilder::add_arrow`].
    pub fn try_add_arrow(&mut self, from: Option<T>, to: Option<T>) -> Result<&mut Self, GraphError> {
        match (from, to) {
            (Some(from), Some(to)) => self.add_arrow(from, to),
            _ => Err(GraphError::NullElement),
        }
    }

    /// Freeze the staged state into an immutable graph. No acyclicity check.
    #[must_use]
    #[instrument(skip(self), fields(elements = self.len()))]
    pub fn create_graph(&self) -> DirectedGraph<T> {
        let graph = self.freeze();
        debug!(arrows = graph.edge_count(), "froze directed graph");
        graph
    }

    /// Freeze the staged state into a [`Dag`] after checking for cycles.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclicGraph`] if the arrows contain a directed
    /// cycle. The offending cycle is logged at `warn` level.
    #[instrument(skip(self), fields(elements = self.len()))]
    pub fn create_acyclic_graph(&self) -> Result<Dag<T>, GraphError> {
        let graph = self.freeze();
        if let Some(cycle) = find_cycle(graph.as_petgraph()) {
            warn!(?cycle, "refusing to freeze cyclic graph as a DAG");
            return Err(GraphError::CyclicGraph);
        }
        debug!(arrows = graph.edge_count(), "froze acyclic graph");
        Ok(Dag::from_graph_unchecked(graph))
    }

    /// Freeze the staged state into a [`Dag`] without checking for cycles.
    ///
    /// The caller guarantees acyclicity. Algorithms fed a cyclic `Dag`
    /// report the violation through their own errors rather than looping.
    #[must_use]
    pub fn create_acyclic_graph_unchecked(&self) -> Dag<T> {
        Dag::from_graph_unchecked(self.freeze())
    }

    fn register(&mut self, element: T) {
        self.predecessors.insert(element.clone(), IndexSet::new());
        self.successors.insert(element, IndexSet::new());
    }

    fn link(&mut self, from: T, to: T) {
        let source = from.clone();
        if let Some(sources) = self.predecessors.get_mut(&to) {
            sources.insert(from);
        }
        if let Some(targets) = self.successors.get_mut(&source) {
            targets.insert(to);
        }
    }

    fn freeze(&self) -> DirectedGraph<T> {
        let mut graph = DiGraph::with_capacity(self.len(), self.arrow_count());
        for element in self.successors.keys() {
            graph.add_node(element.clone());
        }
        for (from_pos, targets) in self.successors.values().enumerate() {
            for to in targets {
                if let Some(to_pos) = self.successors.get_index_of(to) {
                    graph.add_edge(NodeIndex::new(from_pos), NodeIndex::new(to_pos), ());
                }
            }
        }
        DirectedGraph::from_petgraph(graph)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
