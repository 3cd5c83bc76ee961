use std::collections::btree_map::{self, BTreeMap};

use tracing::trace;

use crate::error::{GraphError, Result};
use crate::primitives::{DynamicArray, SortedList};
use crate::types::{EdgeKey, VertexId, Weight};

use super::edge::{AdjEntry, Edge, EdgeRef};

/// Sparse edge index: an ordered map from `(src, dst)` to the owned edge
/// record, plus one weight-ordered adjacency list per source vertex.
///
/// The map is the single owner of every [`Edge`]. Adjacency lists hold
/// [`AdjEntry`] copies (destination and weight), so tearing the index down
/// releases each edge exactly once. Every map entry has exactly one
/// adjacency entry under its source and vice versa.
#[derive(Debug, Clone)]
pub struct SparseEdges<U> {
    vertex_count: usize,
    tree: BTreeMap<EdgeKey, Edge<U>>,
    adjacency: DynamicArray<SortedList<AdjEntry>>,
}

impl<U> SparseEdges<U> {
    /// Creates an empty index over `vertex_count` vertices.
    pub fn new(vertex_count: usize) -> Self {
        let mut adjacency = DynamicArray::with_capacity(vertex_count);
        adjacency.set_length(vertex_count);
        Self {
            vertex_count,
            tree: BTreeMap::new(),
            adjacency,
        }
    }

    /// Number of vertices edges may reference.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.tree.len()
    }

    /// Inserts `src -> dst` or changes its weight, returning the record so
    /// the caller can attach user data.
    ///
    /// # Panics
    /// If either endpoint is out of range.
    pub fn update(&mut self, src: VertexId, dst: VertexId, weight: Weight) -> &mut Edge<U> {
        self.check_vertex(src);
        self.check_vertex(dst);

        let list = self
            .adjacency
            .get_or_insert_with(src.index(), || SortedList::new(AdjEntry::by_weight));
        match self.tree.entry(EdgeKey::new(src, dst)) {
            btree_map::Entry::Occupied(entry) => {
                let edge = entry.into_mut();
                if edge.weight != weight {
                    trace!(%src, %dst, old = edge.weight, new = weight, "edges.sparse.reweight");
                    relink(list, dst, weight);
                    edge.weight = weight;
                }
                edge
            }
            btree_map::Entry::Vacant(entry) => {
                trace!(%src, %dst, weight, "edges.sparse.insert");
                list.add(AdjEntry { dst, weight });
                entry.insert(Edge::new(src, dst, weight))
            }
        }
    }

    /// [`SparseEdges::update`] followed by attaching `user_data`.
    pub fn update_with_data(
        &mut self,
        src: VertexId,
        dst: VertexId,
        weight: Weight,
        user_data: U,
    ) -> &mut Edge<U> {
        let edge = self.update(src, dst, weight);
        edge.user_data = Some(user_data);
        edge
    }

    /// Removes `src -> dst` from both indexes. Returns `None` if absent.
    ///
    /// # Panics
    /// If either endpoint is out of range.
    pub fn remove(&mut self, src: VertexId, dst: VertexId) -> Option<Edge<U>> {
        self.check_vertex(src);
        self.check_vertex(dst);

        let edge = self.tree.remove(&EdgeKey::new(src, dst))?;
        let Some(list) = self.adjacency.get_mut(src.index()) else {
            panic!("edge {src} -> {dst} has no adjacency list");
        };
        let probe = AdjEntry {
            dst,
            weight: edge.weight,
        };
        let Some(cursor) = list.find(&probe, AdjEntry::by_dst) else {
            panic!("edge {src} -> {dst} missing from adjacency list");
        };
        list.remove(&cursor);
        trace!(%src, %dst, "edges.sparse.remove");
        Some(edge)
    }

    /// Stored weight of `src -> dst`.
    pub fn get_weight(&self, src: VertexId, dst: VertexId) -> Option<Weight> {
        self.edge(src, dst).map(|edge| edge.weight)
    }

    /// Edge record of `src -> dst`.
    pub fn edge(&self, src: VertexId, dst: VertexId) -> Option<&Edge<U>> {
        self.check_vertex(src);
        self.check_vertex(dst);
        self.tree.get(&EdgeKey::new(src, dst))
    }

    /// Mutable edge record of `src -> dst`. Changing the weight through it
    /// would desynchronise the adjacency order; use [`SparseEdges::update`].
    pub fn edge_mut(&mut self, src: VertexId, dst: VertexId) -> Option<&mut Edge<U>> {
        self.check_vertex(src);
        self.check_vertex(dst);
        self.tree.get_mut(&EdgeKey::new(src, dst))
    }

    /// Outgoing edges of `vertex` in ascending weight order, or `None` if
    /// the vertex never had an outgoing edge.
    pub fn vertex_edges(&self, vertex: VertexId) -> Option<&SortedList<AdjEntry>> {
        self.check_vertex(vertex);
        self.adjacency.get(vertex.index())
    }

    /// Outgoing edges of `vertex` with their records, ascending by weight.
    pub fn out_edges(&self, vertex: VertexId) -> SparseOutEdges<'_, U> {
        SparseOutEdges {
            tree: &self.tree,
            src: vertex,
            entries: self.vertex_edges(vertex).map(SortedList::iter),
        }
    }

    /// Every edge in `(src, dst)` order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<U>> + '_ {
        self.tree.values()
    }

    /// Drops every edge and adjacency list.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.adjacency.clear();
    }

    /// Verifies that the map and the adjacency lists describe the same
    /// edges and that every list is weight-ordered.
    pub fn check_consistency(&self) -> Result<()> {
        let mut linked = 0usize;
        for (index, list) in self.adjacency.slots().iter().enumerate() {
            let Some(list) = list else { continue };
            let src = VertexId(index as u32);
            let mut previous: Option<Weight> = None;
            for entry in list {
                if previous.is_some_and(|w| w > entry.weight) {
                    return Err(GraphError::Corruption(format!(
                        "adjacency list of {src} is not ordered by weight"
                    )));
                }
                previous = Some(entry.weight);
                match self.tree.get(&EdgeKey::new(src, entry.dst)) {
                    Some(edge) if edge.weight == entry.weight => {}
                    Some(edge) => {
                        return Err(GraphError::Corruption(format!(
                            "edge {src} -> {} has weight {} but is linked with {}",
                            entry.dst, edge.weight, entry.weight
                        )))
                    }
                    None => {
                        return Err(GraphError::Corruption(format!(
                            "adjacency entry {src} -> {} has no edge record",
                            entry.dst
                        )))
                    }
                }
                linked += 1;
            }
        }
        for (key, edge) in &self.tree {
            if *key != edge.key() {
                return Err(GraphError::Corruption(format!(
                    "edge stored under {key} describes {}",
                    edge.key()
                )));
            }
        }
        if linked != self.tree.len() {
            return Err(GraphError::Corruption(format!(
                "{} adjacency entries for {} edges",
                linked,
                self.tree.len()
            )));
        }
        Ok(())
    }

    fn check_vertex(&self, vertex: VertexId) {
        assert!(
            vertex.index() < self.vertex_count,
            "vertex {vertex} out of range (vertex count {})",
            self.vertex_count
        );
    }
}

fn relink(list: &mut SortedList<AdjEntry>, dst: VertexId, weight: Weight) {
    let probe = AdjEntry { dst, weight };
    let Some(cursor) = list.find(&probe, AdjEntry::by_dst) else {
        panic!("edge to {dst} missing from adjacency list");
    };
    list.remove(&cursor);
    list.add(probe);
}

/// Iterator over the outgoing edges of one vertex of a [`SparseEdges`].
pub struct SparseOutEdges<'a, U> {
    tree: &'a BTreeMap<EdgeKey, Edge<U>>,
    src: VertexId,
    entries: Option<crate::primitives::list::Iter<'a, AdjEntry>>,
}

impl<'a, U> Iterator for SparseOutEdges<'a, U> {
    type Item = EdgeRef<'a, U>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.as_mut()?.next()?;
        let edge = self.tree.get(&EdgeKey::new(self.src, entry.dst));
        debug_assert!(edge.is_some(), "adjacency entry without edge record");
        Some(EdgeRef {
            src: self.src,
            dst: entry.dst,
            weight: entry.weight,
            user_data: edge.and_then(|edge| edge.user_data.as_ref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: u32) -> VertexId {
        VertexId(id)
    }

    fn weights_from(edges: &SparseEdges<()>, src: u32) -> Vec<(u32, Weight)> {
        edges
            .out_edges(v(src))
            .map(|edge| (edge.dst.0, edge.weight))
            .collect()
    }

    #[test]
    fn adjacency_is_weight_ordered() {
        let mut edges: SparseEdges<()> = SparseEdges::new(4);
        edges.update(v(0), v(1), 7);
        edges.update(v(0), v(2), 3);
        edges.update(v(0), v(3), 5);
        assert_eq!(weights_from(&edges, 0), vec![(2, 3), (3, 5), (1, 7)]);
        assert!(weights_from(&edges, 1).is_empty());
        assert!(edges.vertex_edges(v(1)).is_none());
        edges.check_consistency().unwrap();
    }

    #[test]
    fn reweight_moves_entry_without_duplicating() {
        let mut edges: SparseEdges<()> = SparseEdges::new(3);
        edges.update(v(0), v(1), 1);
        edges.update(v(0), v(2), 2);
        edges.update(v(0), v(1), 1);
        assert_eq!(edges.edge_count(), 2);
        assert_eq!(weights_from(&edges, 0), vec![(1, 1), (2, 2)]);

        edges.update(v(0), v(1), 9);
        assert_eq!(edges.edge_count(), 2);
        assert_eq!(edges.get_weight(v(0), v(1)), Some(9));
        assert_eq!(weights_from(&edges, 0), vec![(2, 2), (1, 9)]);
        edges.check_consistency().unwrap();
    }

    #[test]
    fn remove_detaches_both_indexes() {
        let mut edges: SparseEdges<&str> = SparseEdges::new(3);
        edges.update_with_data(v(0), v(1), 4, "fee-a");
        edges.update(v(0), v(2), 1);

        let removed = edges.remove(v(0), v(1)).unwrap();
        assert_eq!(removed.user_data, Some("fee-a"));
        assert_eq!(edges.get_weight(v(0), v(1)), None);
        assert!(edges.remove(v(0), v(1)).is_none());
        assert_eq!(edges.vertex_edges(v(0)).map(SortedList::len), Some(1));
        edges.check_consistency().unwrap();
    }

    #[test]
    fn out_edges_carry_user_data() {
        let mut edges: SparseEdges<u64> = SparseEdges::new(3);
        edges.update_with_data(v(1), v(2), 0, 42);
        let first = edges.out_edges(v(1)).next().unwrap();
        assert_eq!(first.user_data, Some(&42));
        assert_eq!(first.src, v(1));
    }

    #[test]
    fn consistency_check_spots_tampered_weight() {
        let mut edges: SparseEdges<()> = SparseEdges::new(2);
        edges.update(v(0), v(1), 3);
        edges.edge_mut(v(0), v(1)).unwrap().weight = 4;
        assert!(matches!(
            edges.check_consistency(),
            Err(GraphError::Corruption(_))
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn update_rejects_unknown_vertex() {
        let mut edges: SparseEdges<()> = SparseEdges::new(2);
        edges.update(v(0), v(2), 1);
    }
}
