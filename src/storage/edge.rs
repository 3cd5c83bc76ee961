use std::cmp::Ordering;

use crate::types::{EdgeKey, VertexId, Weight};

/// Edge record owned by the sparse index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<U> {
    /// Source vertex.
    pub src: VertexId,
    /// Destination vertex.
    pub dst: VertexId,
    /// Stored static weight.
    pub weight: Weight,
    /// Payload handed to custom weight and amount functions.
    pub user_data: Option<U>,
}

impl<U> Edge<U> {
    /// Creates an edge without user data.
    pub fn new(src: VertexId, dst: VertexId, weight: Weight) -> Self {
        Self {
            src,
            dst,
            weight,
            user_data: None,
        }
    }

    /// Composite key of this edge.
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.src, self.dst)
    }
}

/// Non-owning adjacency entry: the destination key plus a copy of the
/// weight the list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjEntry {
    /// Destination vertex.
    pub dst: VertexId,
    /// Weight at the time the entry was linked.
    pub weight: Weight,
}

impl AdjEntry {
    /// Storage order of adjacency lists.
    pub fn by_weight(a: &AdjEntry, b: &AdjEntry) -> Ordering {
        a.weight.cmp(&b.weight)
    }

    /// Lookup order used to locate an entry by destination.
    pub fn by_dst(a: &AdjEntry, b: &AdjEntry) -> Ordering {
        a.dst.cmp(&b.dst)
    }
}

/// Borrowed view of one outgoing edge, yielded by `EdgeIndex::out_edges`.
#[derive(Debug)]
pub struct EdgeRef<'a, U> {
    /// Source vertex.
    pub src: VertexId,
    /// Destination vertex.
    pub dst: VertexId,
    /// Stored static weight.
    pub weight: Weight,
    /// Payload, if one was attached.
    pub user_data: Option<&'a U>,
}

impl<U> Clone for EdgeRef<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for EdgeRef<'_, U> {}
