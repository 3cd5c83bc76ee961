use crate::types::{VertexId, Weight, WEIGHT_ABSENT};

/// Dense edge index: a row-major `vertex_count x vertex_count` weight
/// matrix. Cells without an edge hold [`WEIGHT_ABSENT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseEdges {
    vertex_count: usize,
    weights: Vec<Weight>,
}

impl DenseEdges {
    /// Creates a matrix with no edges.
    ///
    /// # Panics
    /// If `vertex_count * vertex_count` overflows `usize`.
    pub fn new(vertex_count: usize) -> Self {
        let Some(cells) = vertex_count.checked_mul(vertex_count) else {
            panic!("dense matrix of {vertex_count} vertices overflows");
        };
        Self {
            vertex_count,
            weights: vec![WEIGHT_ABSENT; cells],
        }
    }

    /// Number of vertices per row.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Stores `weight` for `src -> dst`, returning the previous weight.
    /// Storing [`WEIGHT_ABSENT`] removes the edge.
    pub fn update(&mut self, src: VertexId, dst: VertexId, weight: Weight) -> Option<Weight> {
        let cell = self.cell(src, dst);
        let previous = std::mem::replace(&mut self.weights[cell], weight);
        present(previous)
    }

    /// Clears `src -> dst`, returning its weight if it was present.
    pub fn remove(&mut self, src: VertexId, dst: VertexId) -> Option<Weight> {
        self.update(src, dst, WEIGHT_ABSENT)
    }

    /// Weight of `src -> dst`, if present.
    pub fn get_weight(&self, src: VertexId, dst: VertexId) -> Option<Weight> {
        present(self.weights[self.cell(src, dst)])
    }

    /// Number of present cells.
    pub fn edge_count(&self) -> usize {
        self.weights.iter().filter(|w| **w != WEIGHT_ABSENT).count()
    }

    /// Outgoing edges of `src` in column order.
    pub fn out_edges(&self, src: VertexId) -> DenseOutEdges<'_> {
        assert!(
            src.index() < self.vertex_count,
            "vertex {src} out of range (vertex count {})",
            self.vertex_count
        );
        let start = src.index() * self.vertex_count;
        DenseOutEdges {
            row: &self.weights[start..start + self.vertex_count],
            column: 0,
        }
    }

    /// Clears every cell.
    pub fn clear(&mut self) {
        self.weights.fill(WEIGHT_ABSENT);
    }

    fn cell(&self, src: VertexId, dst: VertexId) -> usize {
        assert!(
            src.index() < self.vertex_count && dst.index() < self.vertex_count,
            "edge {src} -> {dst} out of range (vertex count {})",
            self.vertex_count
        );
        src.index() * self.vertex_count + dst.index()
    }
}

fn present(weight: Weight) -> Option<Weight> {
    (weight != WEIGHT_ABSENT).then_some(weight)
}

/// Row scan over one source vertex of a [`DenseEdges`], yielding
/// `(dst, weight)` for present cells.
pub struct DenseOutEdges<'a> {
    row: &'a [Weight],
    column: usize,
}

impl Iterator for DenseOutEdges<'_> {
    type Item = (VertexId, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        while self.column < self.row.len() {
            let column = self.column;
            self.column += 1;
            if let Some(weight) = present(self.row[column]) {
                return Some((VertexId(column as u32), weight));
            }
        }
        None
    }
}
