use crate::error::{GraphError, Result};
use crate::types::{Vertex, VertexId};

use super::index::EdgeIndex;

/// Fixed vertex set plus one edge index.
///
/// Vertices never change after construction. Edges change only through
/// [`Graph::edges_mut`] between searches.
#[derive(Debug, Clone)]
pub struct Graph<P = (), U = ()> {
    vertices: Vec<Vertex<P>>,
    edges: EdgeIndex<U>,
}

impl<P, U> Graph<P, U> {
    /// Builds a graph whose vertex `i` carries `payloads[i]`.
    ///
    /// Fails if there are no vertices, if the count does not fit a
    /// [`VertexId`], or if `edges` was sized for a different vertex count.
    pub fn new(payloads: Vec<P>, edges: EdgeIndex<U>) -> Result<Self> {
        if payloads.is_empty() {
            return Err(GraphError::InvalidArgument(
                "graph needs at least one vertex".into(),
            ));
        }
        if u32::try_from(payloads.len()).is_err() {
            return Err(GraphError::InvalidArgument(format!(
                "{} vertices exceed the vertex id range",
                payloads.len()
            )));
        }
        if edges.vertex_count() != payloads.len() {
            return Err(GraphError::InvalidArgument(format!(
                "edge index sized for {} vertices, graph has {}",
                edges.vertex_count(),
                payloads.len()
            )));
        }
        let vertices = payloads
            .into_iter()
            .enumerate()
            .map(|(index, data)| Vertex {
                id: VertexId(index as u32),
                data,
            })
            .collect();
        Ok(Self { vertices, edges })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// All vertices in id order.
    pub fn vertices(&self) -> &[Vertex<P>] {
        &self.vertices
    }

    /// Vertex `id`, if it exists.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<P>> {
        self.vertices.get(id.index())
    }

    /// Edge index.
    pub fn edges(&self) -> &EdgeIndex<U> {
        &self.edges
    }

    /// Mutable edge index, for updates between searches.
    pub fn edges_mut(&mut self) -> &mut EdgeIndex<U> {
        &mut self.edges
    }

    /// Whether `id` names a vertex of this graph.
    pub fn contains(&self, id: VertexId) -> bool {
        id.index() < self.vertices.len()
    }
}

impl<U> Graph<(), U> {
    /// Builds a graph with payload-free vertices, one per slot of `edges`.
    pub fn from_edges(edges: EdgeIndex<U>) -> Result<Self> {
        let payloads = vec![(); edges.vertex_count()];
        Self::new(payloads, edges)
    }
}
