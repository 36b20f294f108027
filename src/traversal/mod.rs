//! Traversal and connectivity: BFS/DFS with level/parent-arc tables,
//! connected components, strongly connected components, bridges and cut
//! vertices, two-edge-connected components, and spanning forests.

mod bfs_dfs;
mod components;
mod spanning;

pub use bfs_dfs::{Bfs, Dfs};
pub use components::{
    bridges_and_cut_vertices, connected_components, strongly_connected_components,
    two_edge_connected_components, BridgeReport, Components,
};
pub use spanning::{spanning_forest, spanning_forest_unweighted, SpanningForest};
