#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cumulative or per-edge cost.
pub type Weight = i64;

/// Value carried along a path for amount-dependent edge costs.
pub type Amount = i64;

/// Weight stored in a dense matrix cell that holds no edge.
pub const WEIGHT_ABSENT: Weight = -1;

/// Weight of a vertex no relaxation has reached yet.
pub const WEIGHT_UNSET: Weight = Weight::MAX;

/// Amount of a vertex before any amount has been propagated to it.
pub const AMOUNT_UNSET: Amount = Amount::MAX;

/// Dense vertex index in `0..vertex_count`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub u32);

impl VertexId {
    /// The id as a slice index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(value: u32) -> Self {
        VertexId(value)
    }
}

impl From<VertexId> for u32 {
    fn from(value: VertexId) -> Self {
        value.0
    }
}

/// Composite `(source, destination)` key identifying one directed edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct EdgeKey {
    /// Source vertex.
    pub src: VertexId,
    /// Destination vertex.
    pub dst: VertexId,
}

impl EdgeKey {
    /// Builds the key for `src -> dst`.
    pub fn new(src: VertexId, dst: VertexId) -> Self {
        Self { src, dst }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

/// A graph vertex with its caller-defined payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex<P> {
    /// Position of the vertex in the graph.
    pub id: VertexId,
    /// Opaque payload, immutable once the graph is built.
    pub data: P,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_keys_order_by_source_then_destination() {
        let mut keys = vec![
            EdgeKey::new(VertexId(1), VertexId(0)),
            EdgeKey::new(VertexId(0), VertexId(5)),
            EdgeKey::new(VertexId(0), VertexId(2)),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                EdgeKey::new(VertexId(0), VertexId(2)),
                EdgeKey::new(VertexId(0), VertexId(5)),
                EdgeKey::new(VertexId(1), VertexId(0)),
            ]
        );
        assert_eq!(keys[0].to_string(), "0 -> 2");
    }
}
