//! Error taxonomy.
//!
//! `GraphError` is a bare `error_stack::Context`, the same shape as
//! `petgraph_core::error::Error`: it carries no data of its own, and call
//! sites that detect a fault attach structured context (the offending node
//! or arc, the algorithm name, the rule that was violated) with
//! `.attach_printable(..)` before returning the `Report`.
//!
//! `AlgorithmicOutcome` values (unreached node, no augmenting path,
//! infeasible flow) are never represented here — they are ordinary return
//! values, per the propagation policy in the error handling design.

use core::fmt;

use error_stack::Context;

/// Error kinds surfaced by algorithms in this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A precondition was violated: negative cost under Dijkstra's `Sum`
    /// mode, negative capacity, a callback returning NaN, a missing
    /// source, or an endpoint not belonging to the graph.
    PreconditionViolation,
    /// A debug-only check detected that the underlying graph was mutated
    /// while an algorithm held a reference to it.
    InvariantBroken,
    /// Bellman-Ford detected a negative cycle reachable from a source.
    NegativeCycle,
    /// Cooperative cancellation interrupted a `run`/`run_until_fixed` call.
    /// The algorithm's state reflects every step executed before
    /// cancellation and remains valid to read.
    Cancelled,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            GraphError::PreconditionViolation => "graph algorithm precondition violated",
            GraphError::InvariantBroken => "graph algorithm invariant broken",
            GraphError::NegativeCycle => "negative cycle reachable from source",
            GraphError::Cancelled => "graph algorithm cancelled",
        };
        f.write_str(msg)
    }
}

impl Context for GraphError {}

/// Convenience alias for the `error-stack` result type used throughout.
pub type GraphResult<T> = error_stack::Result<T, GraphError>;
