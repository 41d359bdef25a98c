//! Directed graph staging, freezing and analysis.
//!
//! # Overview
//!
//! Graphs are assembled in a mutable [`GraphBuilder`] and frozen into
//! immutable snapshots. A snapshot is either a plain [`DirectedGraph`] or a
//! [`Dag`], which additionally guarantees the arrows contain no directed
//! cycle. Both expose the read-only [`GraphView`] query surface.
//!
//! ## Pipeline
//!
//! ```text
//! GraphBuilder (IndexMap staging, mutable)
//!        ↓  create_graph()             → DirectedGraph
//!        ↓  create_acyclic_graph()     → Dag   (cycles::find_cycle must be None)
//!        ↓  create_acyclic_graph_unchecked() → Dag (caller vouches)
//! Dag
//!        ↓  reduce::transitive_reduction()
//! Dag with redundant arrows removed
//! ```
//!
//! ## Edge Direction
//!
//! An arrow `A → B` means "A precedes B": `B` is a direct successor of `A`
//! and `A` is a direct predecessor of `B`.
//!
//! ## Snapshots
//!
//! Freezing copies the staging maps into a `petgraph` [`petgraph::graph::DiGraph`]
//! exactly once. The builder may keep being mutated and frozen again; earlier
//! snapshots are unaffected.

pub mod builder;
pub mod cycles;
pub mod directed;
pub mod reduce;

pub use builder::GraphBuilder;
pub use cycles::{find_cycle, has_cycle};
pub use directed::{Dag, DirectedGraph, GraphView};
pub use reduce::transitive_reduction;
