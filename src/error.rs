//! Errors raised while building a problem from untrusted input.
//!
//! Infeasibility is not an error: see [`crate::search::SolveOutcome`].

use thiserror::Error;

/// Malformed problem data, detected before any search starts.
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("problem has no hub node")]
    MissingHub,

    #[error("problem has more than one hub node ({first} and {second})")]
    DuplicateHub { first: usize, second: usize },

    #[error("node at position {position} declares id {id}")]
    NodeIdMismatch { position: usize, id: usize },

    #[error("distance matrix is {size}x{size} but the problem has {nodes} nodes")]
    MatrixSizeMismatch { size: usize, nodes: usize },

    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("distance from {from} to {to} is invalid: {value}")]
    InvalidDistance { from: usize, to: usize, value: f64 },

    #[error("no distance given from {from} to {to}")]
    MissingDistance { from: usize, to: usize },

    #[error("distance from node {node} to itself must be zero, got {value}")]
    NonZeroDiagonal { node: usize, value: f64 },

    #[error("node {node} has {len} demand entries, expected {expected}")]
    DemandArity {
        node: usize,
        len: usize,
        expected: usize,
    },

    #[error("node {node} has negative demand {value} for commodity {commodity}")]
    NegativeDemand {
        node: usize,
        commodity: usize,
        value: i32,
    },

    #[error("node {node} is not a delivery but carries demand")]
    DemandOnNonDelivery { node: usize },

    #[error("vehicle `{vehicle}` has {len} capacity entries, expected {expected}")]
    CapacityArity {
        vehicle: String,
        len: usize,
        expected: usize,
    },

    #[error("vehicle `{vehicle}` has negative capacity {value} for commodity {commodity}")]
    NegativeCapacity {
        vehicle: String,
        commodity: usize,
        value: i32,
    },

    #[error("vehicle `{vehicle}` has invalid {field}: {value}")]
    InvalidCost {
        vehicle: String,
        field: &'static str,
        value: f64,
    },

    #[error("vehicle roster is empty")]
    EmptyFleet,

    #[error("{count} delivery nodes exceed the supported maximum of {max}")]
    TooManyDeliveries { count: usize, max: usize },

    #[error("{count} vehicle types exceed the supported maximum of {max}")]
    TooManyVehicleTypes { count: usize, max: usize },

    #[error("failed to decode configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = ProblemError::MatrixSizeMismatch { size: 3, nodes: 4 };
        assert_eq!(
            e.to_string(),
            "distance matrix is 3x3 but the problem has 4 nodes"
        );

        let e = ProblemError::NegativeCapacity {
            vehicle: "V".to_string(),
            commodity: 1,
            value: -2,
        };
        assert!(e.to_string().contains("`V`"));
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let e: ProblemError = err.into();
        assert!(matches!(e, ProblemError::Json(_)));
    }
}
