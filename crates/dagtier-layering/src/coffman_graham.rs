//! Width-bounded Coffman–Graham layering.
//!
//! # Overview
//!
//! Given a DAG and a maximum layer width `W`, assign every element to a
//! layer index so that each element sits in a strictly higher layer than
//! every direct predecessor and no layer holds more than `W` elements,
//! keeping the number of layers small.
//!
//! # Algorithm
//!
//! 1. **Priority labelling.** Labels `1..=n` are handed out one at a time.
//!    An element is eligible once all of its direct predecessors carry a
//!    label. Among eligible elements, the one whose predecessor labels,
//!    sorted descending, form the lexicographically smallest sequence wins
//!    (a proper prefix sorts first, so sources go before everything else).
//!    Ties fall back to insertion order. If no element is eligible while some
//!    remain unlabelled, the input had a cycle and labelling fails with
//!    [`LayeringError::GraphNotAcyclic`].
//! 2. **Layer assignment.** Elements are placed in label order. An element
//!    whose deepest predecessor sits in layer `m` (or that has none, `m = -1`)
//!    goes into the first layer at index `m + 1` or later that still has
//!    room, opening a new layer at the end when every existing candidate is
//!    full.
//!
//! Label order is a topological order, so every predecessor is placed before
//! its successors and the scan only moves forward. Layers are opened strictly
//! at the end, so no layer is ever left empty below a populated one.
//!
//! The result is a heuristic layering. Because placement backfills earlier
//! layers with free room, no bound relative to the optimal layer count is
//! guaranteed.

use std::collections::{BTreeSet, HashMap};

use dagtier_core::{Dag, Element, GraphView};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument, trace};

use crate::config::LayeringConfig;
use crate::error::LayeringError;
use crate::layering::Layering;

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// A stateless Coffman–Graham solver bound to a maximum layer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoffmanGraham {
    width: usize,
}

impl CoffmanGraham {
    /// Create a solver that places at most `width` elements per layer.
    ///
    /// # Errors
    ///
    /// Returns [`LayeringError::InvalidWidth`] if `width` is 0.
    pub const fn solver_for_arbitrary_graphs(width: usize) -> Result<Self, LayeringError> {
        if width < 1 {
            return Err(LayeringError::InvalidWidth(width));
        }
        Ok(Self { width })
    }

    /// Create a solver from a [`LayeringConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`LayeringError::InvalidWidth`] if `config.max_width` is 0.
    pub const fn from_config(config: &LayeringConfig) -> Result<Self, LayeringError> {
        Self::solver_for_arbitrary_graphs(config.max_width)
    }

    /// Maximum number of elements per layer.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Run the labelling phase on its own.
    ///
    /// # Errors
    ///
    /// Returns [`LayeringError::GraphNotAcyclic`] if `dag` was frozen without
    /// validation and contains a cycle.
    pub fn priority_labels<T: Element>(dag: &Dag<T>) -> Result<PriorityLabels<T>, LayeringError> {
        let graph = dag.as_petgraph();
        let order = label_order(graph)?;
        Ok(PriorityLabels::from_order(
            order.into_iter().map(|idx| graph[idx].clone()).collect(),
        ))
    }

    /// Compute the layering of `dag`.
    ///
    /// Layer 0 comes first. Within a layer, elements appear in placement
    /// order, which callers should treat as unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`LayeringError::GraphNotAcyclic`] if `dag` was frozen without
    /// validation and contains a cycle.
    #[instrument(skip(self, dag), fields(width = self.width, elements = dag.count()))]
    pub fn solve<T: Element>(&self, dag: &Dag<T>) -> Result<Layering<T>, LayeringError> {
        let graph = dag.as_petgraph();
        let order = label_order(graph)?;
        let placed = assign_layers(graph, &order, self.width);

        debug!(layers = placed.len(), "coffman-graham layering complete");
        Ok(Layering::from_layers(
            placed
                .into_iter()
                .map(|layer| layer.into_iter().map(|idx| graph[idx].clone()).collect())
                .collect(),
        ))
    }
}

// ---------------------------------------------------------------------------
// PriorityLabels
// ---------------------------------------------------------------------------

/// The labelling produced by phase 1: a bijection from elements to `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityLabels<T: Element> {
    order: Vec<T>,
    labels: HashMap<T, usize>,
}

impl<T: Element> PriorityLabels<T> {
    fn from_order(order: Vec<T>) -> Self {
        let labels = order
            .iter()
            .enumerate()
            .map(|(pos, element)| (element.clone(), pos + 1))
            .collect();
        Self { order, labels }
    }

    /// The label of `element`, starting at 1.
    #[must_use]
    pub fn label_of(&self, element: &T) -> Option<usize> {
        self.labels.get(element).copied()
    }

    /// Elements sorted by label; `in_label_order()[i]` has label `i + 1`.
    #[must_use]
    pub fn in_label_order(&self) -> &[T] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Phase 1: labelling
// ---------------------------------------------------------------------------

/// Node indices in increasing label order.
fn label_order<N>(graph: &DiGraph<N, ()>) -> Result<Vec<NodeIndex>, LayeringError> {
    let n = graph.node_count();
    // 0 marks "unlabelled"; real labels start at 1.
    let mut label: Vec<usize> = vec![0; n];
    let mut waiting: Vec<usize> = graph
        .node_indices()
        .map(|v| graph.neighbors_directed(v, Direction::Incoming).count())
        .collect();

    // Keyed by (descending predecessor labels, insertion index); the
    // smallest key is the next element to label.
    let mut eligible: BTreeSet<(Vec<usize>, NodeIndex)> = graph
        .node_indices()
        .filter(|v| waiting[v.index()] == 0)
        .map(|v| (Vec::new(), v))
        .collect();

    let mut order: Vec<NodeIndex> = Vec::with_capacity(n);
    while let Some((_, v)) = eligible.pop_first() {
        order.push(v);
        label[v.index()] = order.len();

        for w in graph.neighbors_directed(v, Direction::Outgoing) {
            let remaining = &mut waiting[w.index()];
            *remaining -= 1;
            if *remaining == 0 {
                eligible.insert((predecessor_labels(graph, w, &label), w));
            }
        }
    }

    if order.len() < n {
        return Err(LayeringError::GraphNotAcyclic {
            labeled: order.len(),
            total: n,
        });
    }
    Ok(order)
}

fn predecessor_labels<N>(graph: &DiGraph<N, ()>, node: NodeIndex, label: &[usize]) -> Vec<usize> {
    let mut labels: Vec<usize> = graph
        .neighbors_directed(node, Direction::Incoming)
        .map(|p| label[p.index()])
        .collect();
    labels.sort_unstable_by(|a, b| b.cmp(a));
    labels
}

// ---------------------------------------------------------------------------
// Phase 2: layer assignment
// ---------------------------------------------------------------------------

fn assign_layers<N>(graph: &DiGraph<N, ()>, order: &[NodeIndex], width: usize) -> Vec<Vec<NodeIndex>> {
    let mut layer_of: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut layers: Vec<Vec<NodeIndex>> = Vec::new();

    for &v in order {
        let mut candidate = graph
            .neighbors_directed(v, Direction::Incoming)
            .filter_map(|p| layer_of[p.index()])
            .max()
            .map_or(0, |deepest| deepest + 1);

        while layers.get(candidate).is_some_and(|layer| layer.len() >= width) {
            candidate += 1;
        }
        if candidate == layers.len() {
            layers.push(Vec::new());
        }
        layers[candidate].push(v);
        layer_of[v.index()] = Some(candidate);
        trace!(node = v.index(), layer = candidate, "placed element");
    }

    layers
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
