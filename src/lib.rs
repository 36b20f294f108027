//! `graphalg` is a reusable in-memory graph library: node/arc handles, a
//! family of read-only graph adaptors, and the classical algorithm families
//! built on top of them (shortest paths, flows, matchings, connectivity,
//! TSP heuristics, structural isomorphism) plus an abstract linear-
//! programming collaborator interface.
//!
//! Every algorithm is a `Step`/`Run`/`RunUntilFixed`-advanced state object
//! rather than a free function: construction wires up the graph view and
//! pure callback parameters (cost, capacity, heuristic), and no work
//! happens until the caller drives it. Algorithm objects never mutate the
//! graph they are given; mutating it while an algorithm holds a reference
//! is the caller's responsibility to avoid (see [`error`] for the
//! `InvariantBroken` debug-only guard some algorithms offer).
//!
//! # Layout
//!
//! - [`id`] — opaque `NodeId`/`ArcId` handles and the `ArcFilter`/
//!   `Directedness` enums.
//! - [`error`] — the `GraphError` taxonomy and `GraphResult` alias.
//! - [`queue`] — the intrusive decrease-key priority queue shared by
//!   Dijkstra, Preflow, and network simplex pricing.
//! - [`union_find`] — union-by-rank disjoint sets.
//! - [`graph`] — the `GraphCapability`/`MutableGraph` traits, the concrete
//!   owning `Graph`, and the read-only adaptors (`Subgraph`, `Reversed`,
//!   `Contracted`, `Supergraph`, `PathGraph`, `Redirected`,
//!   `UndirectedView`).
//! - [`path`] — `Path`, a sequence of arcs readable back from any
//!   shortest-path algorithm's parent-arc table.
//! - [`measure`] — the `Measure` numeric bound used for costs, capacities,
//!   and heuristics.
//! - [`traversal`] — BFS/DFS, connected/strongly-connected/two-edge-
//!   connected components, bridges and cut vertices, spanning forests.
//! - [`shortest_paths`] — Dijkstra, Bellman-Ford, A*, bidirectional
//!   Dijkstra, and edge/node-disjoint shortest paths.
//! - [`flows`] — Preflow (max-flow) and network simplex (min-cost flow).
//! - [`matching`] — general maximum matching and bipartite matching.
//! - [`tsp`] — heuristic TSP tour construction and 2-opt improvement.
//! - [`isomorphism`] — VF2-style structural (and induced-subgraph)
//!   isomorphism search.
//! - [`lp`] — the abstract linear-programming capability and the
//!   `OptimalSubgraph`/`OptimalVertexSet` problem builders.

pub mod error;
pub mod flows;
pub mod graph;
pub mod id;
pub mod isomorphism;
pub mod lp;
pub mod matching;
pub mod measure;
pub mod path;
pub mod queue;
pub mod shortest_paths;
pub mod traversal;
pub mod tsp;
pub mod union_find;

pub use error::{GraphError, GraphResult};
pub use graph::{GraphCapability, MutableGraph};
pub use id::{ArcFilter, ArcId, Directedness, NodeId};
pub use path::Path;
