//! Opaque node and arc handles.
//!
//! `NodeId` and `ArcId` are newtype indices, not raw pointers or references:
//! a concrete graph owns two insertion-ordered arenas and hands out handles
//! into them. Handles compare by identity, are `Copy`, and carry no payload
//! of their own.

use core::fmt;

/// Sentinel index used by both `NodeId` and `ArcId` to mean "invalid".
const END: u32 = u32::MAX;

/// A vertex handle.
///
/// `NodeId::end()` is the sentinel "invalid" node; it never identifies a
/// real node of any graph.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// The sentinel "invalid" node.
    #[inline]
    pub const fn end() -> Self {
        NodeId(END)
    }

    /// Whether this is the sentinel "invalid" node.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != END
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId(invalid)")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::end()
    }
}

/// An arc handle: a directed arc or an undirected edge, depending on how it
/// was added to the owning graph.
///
/// `ArcId::end()` is the sentinel "invalid" arc.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArcId(u32);

impl ArcId {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        ArcId(index)
    }

    /// The sentinel "invalid" arc.
    #[inline]
    pub const fn end() -> Self {
        ArcId(END)
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != END
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ArcId({})", self.0)
        } else {
            write!(f, "ArcId(invalid)")
        }
    }
}

impl Default for ArcId {
    fn default() -> Self {
        ArcId::end()
    }
}

/// Whether a graph (or a single arc within a graph) is directed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Directedness {
    Directed,
    Undirected,
}

impl Directedness {
    #[inline]
    pub const fn is_edge(self) -> bool {
        matches!(self, Directedness::Undirected)
    }
}

/// Restricts arc enumeration around a node.
///
/// `Forward` at `v` is `{directed arcs with U=v} ∪ {edges incident to v}`;
/// `Backward` is the symmetric set on the `V` side. Each edge is counted in
/// both `Forward` and `Backward` under the same handle (see the "filter
/// consistency" invariant in the data model).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArcFilter {
    All,
    Edge,
    Forward,
    Backward,
}
