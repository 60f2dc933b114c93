//! Error types for algorithm failures.
//!
//! Only broken algorithm preconditions are errors. Missing vertices,
//! unreachable targets and empty graphs produce empty results instead.

use thiserror::Error;

/// Result type used by the algorithm entry points.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Failures raised by the shortest-path family and everything built on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Dijkstra examined an edge with a negative weight.
    #[error("negative edge weight {weight} on {from} -> {to}: Dijkstra requires non-negative weights")]
    NegativeWeight { from: String, to: String, weight: f64 },

    /// Bellman-Ford still relaxed an edge after |V|-1 passes.
    #[error("negative-weight cycle reachable from {origin}")]
    NegativeCycle { origin: String },
}
