use std::fmt;

use crate::element::describe;

/// Failures raised while staging, freezing or querying a graph.
///
/// Elements are carried as their `Debug` rendering so the error stays
/// independent of the element type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An absent element was handed to the builder.
    #[error("element is absent")]
    NullElement,
    /// The element was already added to the builder.
    #[error("element already present in graph: {0}")]
    DuplicateElement(String),
    /// The element was never added to the builder or graph.
    #[error("element not found in graph: {0}")]
    UnknownElement(String),
    /// The ordered pair was already added as an arrow.
    #[error("arrow already present in graph: {from} -> {to}")]
    DuplicateArrow { from: String, to: String },
    /// An arrow from an element to itself.
    #[error("self-arrow rejected: {0} -> {0}")]
    SelfArrow(String),
    /// An acyclic graph was requested but the arrows form a directed cycle.
    #[error("graph contains a directed cycle")]
    CyclicGraph,
}

impl GraphError {
    pub(crate) fn unknown<T: fmt::Debug>(element: &T) -> Self {
        Self::UnknownElement(describe(element))
    }

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NullElement => "E1001",
            Self::DuplicateElement(_) => "E1002",
            Self::UnknownElement(_) => "E1003",
            Self::DuplicateArrow { .. } => "E1004",
            Self::SelfArrow(_) => "E1005",
            Self::CyclicGraph => "E1006",
        }
    }

    /// Optional remediation hint for callers surfacing the error to people.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NullElement => Some("Filter out missing values before adding them."),
            Self::DuplicateElement(_) => Some("Check `contains` before adding an element."),
            Self::UnknownElement(_) => Some("Add both endpoints with `add_element` first."),
            Self::DuplicateArrow { .. } => None,
            Self::SelfArrow(_) => Some("An element cannot precede itself; drop the arrow."),
            Self::CyclicGraph => {
                Some("Remove or reverse an arrow on the cycle, or use `create_graph`.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GraphError;
    use std::collections::HashSet;

    fn all() -> Vec<GraphError> {
        vec![
            GraphError::NullElement,
            GraphError::DuplicateElement("a".into()),
            GraphError::UnknownElement("a".into()),
            GraphError::DuplicateArrow {
                from: "a".into(),
                to: "b".into(),
            },
            GraphError::SelfArrow("a".into()),
            GraphError::CyclicGraph,
        ]
    }

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for err in all() {
            assert!(seen.insert(err.code()), "duplicate code {}", err.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for err in all() {
            let code = err.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn unknown_renders_debug_form() {
        let err = GraphError::unknown(&"ghost");
        assert_eq!(err, GraphError::UnknownElement("\"ghost\"".into()));
        assert_eq!(err.to_string(), "element not found in graph: \"ghost\"");
    }

    #[test]
    fn duplicate_arrow_message_names_both_ends() {
        let err = GraphError::DuplicateArrow {
            from: "1".into(),
            to: "2".into(),
        };
        assert_eq!(err.to_string(), "arrow already present in graph: 1 -> 2");
    }
}
