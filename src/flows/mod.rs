//! Network flow: maximum flow via highest-label push-relabel, and
//! minimum-cost flow via network simplex.

mod network_simplex;
mod preflow;

pub use network_simplex::{NetworkSimplex, NetworkSimplexMode, NetworkSimplexOutcome};
pub use preflow::{Preflow, PreflowMode};
