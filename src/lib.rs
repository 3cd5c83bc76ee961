//! Least-cost path search over directed weighted graphs.
//!
//! A [`Graph`] pairs a fixed vertex set with an [`EdgeIndex`], either a dense
//! weight matrix or a sparse keyed map with weight-ordered adjacency lists.
//! A [`PathFinder`] runs FIFO-driven relaxation over it, optionally deriving
//! edge costs from the amount carried along the path.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Crate error type and result alias.
pub mod error;
/// Tracing subscriber setup.
pub mod logging;
/// Container primitives: slot array, ordered list, sorted list, queue.
pub mod primitives;
/// Path search engine, per-run vertex records and cost models.
pub mod route;
/// Graph and edge index storage.
pub mod storage;
/// Vertex ids, weight and amount types and their sentinels.
pub mod types;

pub use error::{GraphError, Result};
pub use logging::init_logging;
pub use route::{
    PathFinder, RelaxationMode, Route, RouteOptions, RoutingFee, RunStats, VertexStatus,
    VisitState,
};
pub use storage::{Edge, EdgeIndex, EdgeIndexKind, Graph};
pub use types::{Amount, VertexId, Weight};
