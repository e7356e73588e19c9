use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableauError {
    /// The data structure cannot answer the request without losing its
    /// complexity guarantee; the caller should switch to a mixed variant.
    #[error("{operation} requires a full-rank {structure}; use the mixed variant for states of lower rank")]
    BadDataStructure {
        operation: &'static str,
        structure: &'static str,
    },

    /// Row or qubit counts of the arguments do not line up.
    #[error("{context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
}
