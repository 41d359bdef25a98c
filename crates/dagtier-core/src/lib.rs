#![forbid(unsafe_code)]
//! dagtier-core library.
//!
//! Mutable [`GraphBuilder`] staging, frozen [`DirectedGraph`] / [`Dag`]
//! snapshots, depth-first cycle detection and transitive reduction.
//!
//! # Conventions
//!
//! - **Errors**: Every fallible operation returns [`GraphError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!   The library never installs a subscriber.
//!
//! ```rust
//! use dagtier_core::{GraphBuilder, GraphView};
//!
//! let mut builder = GraphBuilder::new();
//! builder
//!     .add_element("fetch")?
//!     .add_element("compile")?
//!     .add_element("link")?
//!     .add_arrow("fetch", "compile")?
//!     .add_arrow("compile", "link")?
//!     .add_arrow("fetch", "link")?;
//!
//! let dag = builder.create_acyclic_graph()?;
//! let reduced = dag.transitive_reduction();
//! assert!(!reduced.has_arrow(&"fetch", &"link"));
//! # Ok::<(), dagtier_core::GraphError>(())
//! ```

pub mod element;
pub mod error;
pub mod graph;

pub use element::Element;
pub use error::GraphError;
pub use graph::{Dag, DirectedGraph, GraphBuilder, GraphView};
