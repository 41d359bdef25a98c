//! Transitive reduction for DAG snapshots.
//!
//! An arrow `u → x` is redundant if `x` can also be reached from `u` through
//! another direct successor `c` of `u` (a path `u → c → … → x` of length
//! ≥ 2). Removing every redundant arrow yields the unique edge-minimal DAG
//! with the same reachability relation. The operation is idempotent.
//!
//! # Complexity
//!
//! Descendant sets are computed once per element that is some element's
//! direct successor, each by an explicit-stack traversal, so the work is
//! O(V·(V+E)) time and O(V²) bits of memory. Intended inputs are dependency
//! graphs of a few hundred elements.

use std::collections::HashSet;

use fixedbitset::FixedBitSet;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::element::Element;
use crate::graph::directed::{Dag, DirectedGraph, GraphView};

/// Compute the transitive reduction of `dag`.
///
/// Returns a new [`Dag`] with the same elements (same insertion order) and
/// only the arrows not implied by a longer path. `dag` is not modified.
#[must_use]
#[instrument(skip(dag), fields(elements = dag.count(), arrows = dag.edge_count()))]
pub fn transitive_reduction<T: Element>(dag: &Dag<T>) -> Dag<T> {
    let graph = dag.as_petgraph();
    let mut below: Vec<Option<FixedBitSet>> = vec![None; graph.node_count()];
    let mut redundant: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();

    for u in graph.node_indices() {
        let direct: Vec<NodeIndex> = graph.neighbors_directed(u, Direction::Outgoing).collect();
        for &c in &direct {
            let reach = below[c.index()].get_or_insert_with(|| descendants(graph, c));
            for &x in &direct {
                if x != c && reach.contains(x.index()) {
                    redundant.insert((u, x));
                }
            }
        }
    }

    let reduced = graph.filter_map(
        |_, element| Some(element.clone()),
        |edge, &()| match graph.edge_endpoints(edge) {
            Some(pair) if redundant.contains(&pair) => None,
            _ => Some(()),
        },
    );

    debug!(
        removed = redundant.len(),
        kept = reduced.edge_count(),
        "transitive reduction complete"
    );
    Dag::from_graph_unchecked(DirectedGraph::from_petgraph(reduced))
}

/// `start` plus every node reachable from it, as a bitset over node indices.
///
/// Explicit stack, so deep chains cannot overflow the call stack.
pub(crate) fn descendants<N, E>(graph: &DiGraph<N, E>, start: NodeIndex) -> FixedBitSet {
    let mut seen = FixedBitSet::with_capacity(graph.node_count());
    seen.insert(start.index());
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            if !seen.put(next.index()) {
                stack.push(next);
            }
        }
    }

    seen
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
