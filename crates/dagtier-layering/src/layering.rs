//! The result of a layering run and its invariant checker.

use std::collections::HashMap;

use dagtier_core::element::describe;
use dagtier_core::{Element, GraphView};

/// An ordered sequence of layers, layer 0 first.
///
/// Immutable once produced; the element → layer lookup is precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layering<T: Element> {
    layers: Vec<Vec<T>>,
    index: HashMap<T, usize>,
}

impl<T: Element> Layering<T> {
    pub(crate) fn from_layers(layers: Vec<Vec<T>>) -> Self {
        let index = layers
            .iter()
            .enumerate()
            .flat_map(|(i, layer)| layer.iter().map(move |element| (element.clone(), i)))
            .collect();
        Self { layers, index }
    }

    /// All layers, layer 0 first. Order within a layer is unspecified.
    #[must_use]
    pub fn layers(&self) -> &[Vec<T>] {
        &self.layers
    }

    #[must_use]
    pub fn into_layers(self) -> Vec<Vec<T>> {
        self.layers
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The layer index of `element`, if it was placed.
    #[must_use]
    pub fn layer_of(&self, element: &T) -> Option<usize> {
        self.index.get(element).copied()
    }

    /// Size of the fullest layer, or 0 when there are no layers.
    #[must_use]
    pub fn max_layer_width(&self) -> usize {
        self.layers.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of placed elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Check this layering against `graph` and `width`.
    ///
    /// Verifies that no layer exceeds `width`, no empty layer precedes a
    /// populated one, every element of `graph` is placed exactly once and
    /// nothing else is placed, and every arrow points to a strictly higher
    /// layer.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayeringViolation`] found.
    pub fn verify<G: GraphView<T>>(&self, graph: &G, width: usize) -> Result<(), LayeringViolation> {
        let last_populated = self.layers.iter().rposition(|layer| !layer.is_empty());
        let mut seen: HashMap<&T, usize> = HashMap::with_capacity(self.index.len());

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.len() > width {
                return Err(LayeringViolation::WidthExceeded {
                    layer: i,
                    size: layer.len(),
                    width,
                });
            }
            if layer.is_empty() && last_populated.is_some_and(|last| last > i) {
                return Err(LayeringViolation::EmptyLayer { layer: i });
            }
            for element in layer {
                if !graph.contains(element) {
                    return Err(LayeringViolation::UnexpectedElement(describe(element)));
                }
                if seen.insert(element, i).is_some() {
                    return Err(LayeringViolation::DuplicateElement(describe(element)));
                }
            }
        }

        if let Some(missing) = graph.elements().find(|e| !seen.contains_key(e)) {
            return Err(LayeringViolation::MissingElement(describe(missing)));
        }

        for (from, to) in graph.arrows() {
            let (Some(&above), Some(&below)) = (seen.get(from), seen.get(to)) else {
                continue;
            };
            if below <= above {
                return Err(LayeringViolation::PrecedenceViolated {
                    from: describe(from),
                    to: describe(to),
                });
            }
        }

        Ok(())
    }
}

/// A broken layering invariant, as reported by [`Layering::verify`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayeringViolation {
    #[error("layer {layer} holds {size} elements, more than the width {width}")]
    WidthExceeded { layer: usize, size: usize, width: usize },
    #[error("layer {layer} is empty but a later layer is populated")]
    EmptyLayer { layer: usize },
    #[error("element {0} is not placed in any layer")]
    MissingElement(String),
    #[error("element {0} is placed more than once")]
    DuplicateElement(String),
    #[error("element {0} is placed but not part of the graph")]
    UnexpectedElement(String),
    #[error("arrow {from} -> {to} does not point to a later layer")]
    PrecedenceViolated { from: String, to: String },
}
