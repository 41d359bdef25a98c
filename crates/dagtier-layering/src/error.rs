/// Failures raised by the Coffman–Graham solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayeringError {
    /// The solver was configured with a width below 1.
    #[error("layer width must be at least 1, got {0}")]
    InvalidWidth(usize),
    /// Priority labelling stalled: some unlabelled element always had an
    /// unlabelled predecessor, so the input was not acyclic.
    #[error("graph is not acyclic: labelled {labeled} of {total} elements before stalling")]
    GraphNotAcyclic { labeled: usize, total: usize },
}

impl LayeringError {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidWidth(_) => "E2001",
            Self::GraphNotAcyclic { .. } => "E2002",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidWidth(_) => Some("Configure `max_width` as a positive integer."),
            Self::GraphNotAcyclic { .. } => {
                Some("Freeze the graph with `create_acyclic_graph` to locate the cycle.")
            }
        }
    }
}
