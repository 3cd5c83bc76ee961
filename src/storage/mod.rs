#![forbid(unsafe_code)]

//! Graph storage: the fixed vertex set and its edge indexes.
//!
//! Edges live either in a dense weight matrix or in a sparse index that
//! pairs a keyed edge map with weight-ordered adjacency lists.

mod dense;
mod edge;
mod graph;
mod index;
mod sparse;

/// Dense weight matrix and its row iterator.
pub use dense::{DenseEdges, DenseOutEdges};

/// Edge records and adjacency entries.
pub use edge::{AdjEntry, Edge, EdgeRef};

/// Vertex set plus edge index.
pub use graph::Graph;

/// Representation-independent edge index.
pub use index::{EdgeIndex, EdgeIndexKind, OutEdges};

/// Keyed edge map with per-source adjacency lists.
pub use sparse::{SparseEdges, SparseOutEdges};
