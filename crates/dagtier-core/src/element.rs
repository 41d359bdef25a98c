//! The bound every graph element must satisfy.

use std::fmt;
use std::hash::Hash;

/// A value that can be stored in a graph.
///
/// Elements key hash maps and sets, so they need structural equality and a
/// stable hash. `Debug` lets error values name the offending element without
/// making [`crate::GraphError`] generic.
///
/// Blanket-implemented for every type meeting the bounds.
pub trait Element: Clone + Eq + Hash + fmt::Debug {}

impl<T> Element for T where T: Clone + Eq + Hash + fmt::Debug {}

/// Render an element for inclusion in an error or diagnostic message.
#[must_use]
pub fn describe<T: fmt::Debug>(element: &T) -> String {
    format!("{element:?}")
}
