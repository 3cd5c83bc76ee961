use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::primitives::SortedList;
use crate::types::{VertexId, Weight};

use super::dense::{DenseEdges, DenseOutEdges};
use super::edge::{AdjEntry, Edge, EdgeRef};
use super::sparse::{SparseEdges, SparseOutEdges};

/// Representation selected when an [`EdgeIndex`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeIndexKind {
    /// Weight matrix with O(1) cell access and row-scan enumeration.
    Dense,
    /// Keyed edge map plus weight-ordered adjacency lists.
    Sparse,
}

/// Edge storage of a graph, dense or sparse behind one interface.
#[derive(Debug, Clone)]
pub enum EdgeIndex<U = ()> {
    /// See [`DenseEdges`].
    Dense(DenseEdges),
    /// See [`SparseEdges`].
    Sparse(SparseEdges<U>),
}

impl<U> EdgeIndex<U> {
    /// Creates an empty index of the given representation.
    pub fn new(kind: EdgeIndexKind, vertex_count: usize) -> Self {
        match kind {
            EdgeIndexKind::Dense => Self::dense(vertex_count),
            EdgeIndexKind::Sparse => Self::sparse(vertex_count),
        }
    }

    /// Creates an empty sparse index.
    pub fn sparse(vertex_count: usize) -> Self {
        EdgeIndex::Sparse(SparseEdges::new(vertex_count))
    }

    /// Creates an empty dense index.
    pub fn dense(vertex_count: usize) -> Self {
        EdgeIndex::Dense(DenseEdges::new(vertex_count))
    }

    /// Representation of this index.
    pub fn kind(&self) -> EdgeIndexKind {
        match self {
            EdgeIndex::Dense(_) => EdgeIndexKind::Dense,
            EdgeIndex::Sparse(_) => EdgeIndexKind::Sparse,
        }
    }

    /// Number of vertices edges may reference.
    pub fn vertex_count(&self) -> usize {
        match self {
            EdgeIndex::Dense(edges) => edges.vertex_count(),
            EdgeIndex::Sparse(edges) => edges.vertex_count(),
        }
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        match self {
            EdgeIndex::Dense(edges) => edges.edge_count(),
            EdgeIndex::Sparse(edges) => edges.edge_count(),
        }
    }

    /// Inserts `src -> dst` or changes its weight. The sparse index returns
    /// the edge record; the dense matrix keeps no record and returns `None`.
    ///
    /// # Panics
    /// If either endpoint is out of range.
    pub fn update(
        &mut self,
        src: VertexId,
        dst: VertexId,
        weight: Weight,
    ) -> Option<&mut Edge<U>> {
        match self {
            EdgeIndex::Dense(edges) => {
                edges.update(src, dst, weight);
                None
            }
            EdgeIndex::Sparse(edges) => Some(edges.update(src, dst, weight)),
        }
    }

    /// Inserts or updates `src -> dst` and attaches `user_data`.
    ///
    /// Fails with [`GraphError::UnsupportedFeature`] on a dense index, which
    /// has nowhere to keep per-edge data.
    pub fn update_with_data(
        &mut self,
        src: VertexId,
        dst: VertexId,
        weight: Weight,
        user_data: U,
    ) -> Result<&mut Edge<U>> {
        match self {
            EdgeIndex::Dense(_) => Err(GraphError::UnsupportedFeature(
                "user data on a dense edge index",
            )),
            EdgeIndex::Sparse(edges) => Ok(edges.update_with_data(src, dst, weight, user_data)),
        }
    }

    /// Removes `src -> dst`, returning the edge if it existed.
    pub fn remove(&mut self, src: VertexId, dst: VertexId) -> Option<Edge<U>> {
        match self {
            EdgeIndex::Dense(edges) => edges
                .remove(src, dst)
                .map(|weight| Edge::new(src, dst, weight)),
            EdgeIndex::Sparse(edges) => edges.remove(src, dst),
        }
    }

    /// Stored weight of `src -> dst`, if present.
    pub fn get_weight(&self, src: VertexId, dst: VertexId) -> Option<Weight> {
        match self {
            EdgeIndex::Dense(edges) => edges.get_weight(src, dst),
            EdgeIndex::Sparse(edges) => edges.get_weight(src, dst),
        }
    }

    /// Weight-ordered adjacency list of `vertex`. Only the sparse index
    /// keeps one; a vertex without outgoing edges has none either.
    pub fn vertex_edges(&self, vertex: VertexId) -> Option<&SortedList<AdjEntry>> {
        match self {
            EdgeIndex::Dense(_) => None,
            EdgeIndex::Sparse(edges) => edges.vertex_edges(vertex),
        }
    }

    /// Outgoing edges of `vertex`: ascending by weight for the sparse
    /// index, column order for the dense matrix.
    pub fn out_edges(&self, vertex: VertexId) -> OutEdges<'_, U> {
        match self {
            EdgeIndex::Dense(edges) => OutEdges::Dense {
                src: vertex,
                row: edges.out_edges(vertex),
            },
            EdgeIndex::Sparse(edges) => OutEdges::Sparse(edges.out_edges(vertex)),
        }
    }

    /// Removes every edge.
    pub fn clear(&mut self) {
        match self {
            EdgeIndex::Dense(edges) => edges.clear(),
            EdgeIndex::Sparse(edges) => edges.clear(),
        }
    }

    /// Audits the dual index of a sparse representation. Always succeeds
    /// for the dense matrix.
    pub fn check_consistency(&self) -> Result<()> {
        match self {
            EdgeIndex::Dense(_) => Ok(()),
            EdgeIndex::Sparse(edges) => edges.check_consistency(),
        }
    }
}

/// Iterator returned by [`EdgeIndex::out_edges`].
pub enum OutEdges<'a, U> {
    /// Row scan of the dense matrix.
    Dense {
        /// Row being scanned.
        src: VertexId,
        /// Remaining cells.
        row: DenseOutEdges<'a>,
    },
    /// Walk of a sparse adjacency list.
    Sparse(SparseOutEdges<'a, U>),
}

impl<'a, U> Iterator for OutEdges<'a, U> {
    type Item = EdgeRef<'a, U>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            OutEdges::Dense { src, row } => row.next().map(|(dst, weight)| EdgeRef {
                src: *src,
                dst,
                weight,
                user_data: None,
            }),
            OutEdges::Sparse(edges) => edges.next(),
        }
    }
}
