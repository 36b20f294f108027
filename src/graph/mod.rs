//! The graph capability interface and its implementations: one concrete,
//! mutable, owning graph, plus a family of read-only adaptors that present
//! a transformed view of an underlying graph through the same interface.
//!
//! Every adaptor is composed at runtime (a `Subgraph` can wrap a
//! `Reversed` can wrap a `Contracted`, ...), so the capability trait below
//! is dynamic-dispatch friendly: its iterator-returning methods return
//! boxed iterators rather than associated iterator types. Algorithms that
//! only need to be generic over *one* graph type at a time (Dijkstra,
//! Preflow, ...) take `&dyn GraphCapability` or `G: GraphCapability + ?Sized`; this mirrors the
//! spec's design note that adaptors composed at runtime need "indirection
//! through a thin object boundary".

mod concrete;
mod contracted;
mod path_graph;
mod redirected;
mod reversed;
mod subgraph;
mod supergraph;
mod undirected;

pub use concrete::Graph;
pub use contracted::Contracted;
pub use path_graph::PathGraph;
pub use redirected::Redirected;
pub use reversed::Reversed;
pub use subgraph::Subgraph;
pub use supergraph::Supergraph;
pub use undirected::UndirectedView;

use crate::error::{GraphError, GraphResult};
use crate::id::{ArcFilter, ArcId, Directedness, NodeId};

/// The read-only capability every adaptor and the concrete graph satisfy.
///
/// Object-safe by construction: no generics, no `impl Trait` in return
/// position, so `&dyn GraphCapability` is always a legal way to hold "some graph
/// view" without naming its concrete type.
pub trait GraphCapability {
    fn node_count(&self) -> usize;
    fn arc_count(&self, filter: ArcFilter) -> usize;

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_>;
    fn arcs(&self, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_>;

    /// Arcs incident to `node` restricted to `filter`. `O(deg)`.
    fn incident(&self, node: NodeId, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_>;

    fn u(&self, arc: ArcId) -> NodeId;
    fn v(&self, arc: ArcId) -> NodeId;
    fn is_edge(&self, arc: ArcId) -> bool;

    /// Stable lookup of the `index`-th node (insertion order within this
    /// graph instance). `None` if out of range.
    fn node_at_index(&self, index: usize) -> Option<NodeId>;
    /// Stable lookup of the `index`-th arc.
    fn arc_at_index(&self, index: usize) -> Option<ArcId>;

    /// The endpoint of `arc` other than `from`.
    ///
    /// Default implementation in terms of `u`/`v`; adaptors rarely need to
    /// override it.
    fn other(&self, arc: ArcId, from: NodeId) -> NodeId {
        let (u, v) = (self.u(arc), self.v(arc));
        if u == from {
            v
        } else {
            u
        }
    }
}

impl GraphCapability for &'_ dyn GraphCapability {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }
    fn arc_count(&self, filter: ArcFilter) -> usize {
        (**self).arc_count(filter)
    }
    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        (**self).nodes()
    }
    fn arcs(&self, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        (**self).arcs(filter)
    }
    fn incident(&self, node: NodeId, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        (**self).incident(node, filter)
    }
    fn u(&self, arc: ArcId) -> NodeId {
        (**self).u(arc)
    }
    fn v(&self, arc: ArcId) -> NodeId {
        (**self).v(arc)
    }
    fn is_edge(&self, arc: ArcId) -> bool {
        (**self).is_edge(arc)
    }
    fn node_at_index(&self, index: usize) -> Option<NodeId> {
        (**self).node_at_index(index)
    }
    fn arc_at_index(&self, index: usize) -> Option<ArcId> {
        (**self).arc_at_index(index)
    }
}

/// Capability provided by leaves: graphs that own their node/arc identity
/// space and can grow or shrink it.
pub trait MutableGraph: GraphCapability {
    fn add_node(&mut self) -> NodeId;
    fn add_arc(&mut self, u: NodeId, v: NodeId, directedness: Directedness) -> GraphResult<ArcId>;
    fn clear(&mut self);

    /// Remove a node and every arc incident to it. Returns
    /// `PreconditionViolation` if `node` does not belong to this graph.
    fn delete_node(&mut self, node: NodeId) -> GraphResult<()>;
    /// Remove a single arc. Returns `PreconditionViolation` if `arc` does
    /// not belong to this graph.
    fn delete_arc(&mut self, arc: ArcId) -> GraphResult<()>;
}

pub(crate) fn precondition(msg: &'static str) -> error_stack::Report<GraphError> {
    error_stack::Report::new(GraphError::PreconditionViolation).attach_printable(msg)
}
