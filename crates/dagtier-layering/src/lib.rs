#![forbid(unsafe_code)]
//! dagtier-layering library.
//!
//! Assigns every element of a [`dagtier_core::Dag`] to a layer so that each
//! element sits strictly below all of its direct predecessors and no layer
//! holds more than a configured number of elements, using the two-phase
//! Coffman–Graham heuristic.
//!
//! # Conventions
//!
//! - **Errors**: Solver failures are [`LayeringError`]; configuration loading
//!   returns `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! ```rust
//! use dagtier_core::GraphBuilder;
//! use dagtier_layering::CoffmanGraham;
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_element("root")?;
//! for leaf in ["a", "b", "c"] {
//!     builder.add_element(leaf)?.add_arrow("root", leaf)?;
//! }
//! let dag = builder.create_acyclic_graph()?;
//!
//! let layering = CoffmanGraham::solver_for_arbitrary_graphs(2)?.solve(&dag)?;
//! assert_eq!(layering.len(), 3);
//! assert_eq!(layering.layer_of(&"root"), Some(0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod coffman_graham;
pub mod config;
pub mod error;
pub mod layering;

pub use coffman_graham::{CoffmanGraham, PriorityLabels};
pub use config::LayeringConfig;
pub use error::LayeringError;
pub use layering::{Layering, LayeringViolation};
