//! Depth-first cycle detection.
//!
//! The traversal visits every node once, keeping a "visited" set and an
//! "on the current path" set. Reaching a successor that is still on the
//! current path closes a cycle; the search stops at the first one found.
//! A self-loop is a one-element cycle.
//!
//! The recursion is unrolled onto an explicit stack of frames so deep chains
//! cannot overflow the call stack. O(V + E).

use fixedbitset::FixedBitSet;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

/// One suspended DFS call: the node, its successors, and the next successor
/// to expand.
type Frame = (NodeIndex, Vec<NodeIndex>, usize);

/// Returns `true` if `graph` contains a directed cycle.
#[must_use]
pub fn has_cycle<N, E>(graph: &DiGraph<N, E>) -> bool {
    first_cycle(graph).is_some()
}

/// Find one directed cycle in `graph`, if any.
///
/// The cycle is returned as a closed path `a -> … -> a`; a self-loop on `a`
/// is reported as `[a, a]`. Which cycle is reported when several exist is
/// deterministic but otherwise unspecified.
#[must_use]
pub fn find_cycle<N: Clone, E>(graph: &DiGraph<N, E>) -> Option<Vec<N>> {
    first_cycle(graph).map(|path| path.into_iter().map(|idx| graph[idx].clone()).collect())
}

fn first_cycle<N, E>(graph: &DiGraph<N, E>) -> Option<Vec<NodeIndex>> {
    let n = graph.node_count();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut on_path = FixedBitSet::with_capacity(n);
    let mut call_stack: Vec<Frame> = Vec::new();

    for root in graph.node_indices() {
        if visited.put(root.index()) {
            continue;
        }
        on_path.insert(root.index());
        call_stack.push((root, successors(graph, root), 0));

        while let Some((current, neighbors, cursor)) = call_stack.last_mut() {
            let Some(&next) = neighbors.get(*cursor) else {
                on_path.set(current.index(), false);
                call_stack.pop();
                continue;
            };
            *cursor += 1;

            if on_path.contains(next.index()) {
                return Some(close_cycle(&call_stack, next));
            }
            if !visited.put(next.index()) {
                on_path.insert(next.index());
                call_stack.push((next, successors(graph, next), 0));
            }
        }
    }

    None
}

fn successors<N, E>(graph: &DiGraph<N, E>, node: NodeIndex) -> Vec<NodeIndex> {
    graph.neighbors_directed(node, Direction::Outgoing).collect()
}

/// Rebuild the path from `entry` (an ancestor on the stack) down to the top
/// frame, then close it back to `entry`.
fn close_cycle(call_stack: &[Frame], entry: NodeIndex) -> Vec<NodeIndex> {
    let start = call_stack
        .iter()
        .position(|(node, _, _)| *node == entry)
        .unwrap_or(0);
    let mut cycle: Vec<NodeIndex> = call_stack[start..].iter().map(|(node, _, _)| *node).collect();
    cycle.push(entry);
    cycle
}
