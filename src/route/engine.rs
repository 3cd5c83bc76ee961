use std::fmt;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::primitives::{DynamicArray, Queue};
use crate::storage::Graph;
use crate::types::{Amount, VertexId, Weight};

use super::options::{RelaxationMode, RouteOptions};
use super::status::VertexStatus;

/// Cost of traversing an edge, given the amount arriving at its source and
/// the edge's user data.
pub type WeightFn<U> = Box<dyn Fn(Amount, Option<&U>) -> Weight>;

/// Amount leaving an edge, given the amount arriving at its source and the
/// edge's user data.
pub type AmountFn<U> = Box<dyn Fn(Amount, Option<&U>) -> Amount>;

/// Counters describing the most recent run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Vertices whose outgoing edges were expanded.
    pub expansions: u64,
    /// Dequeued vertices skipped because they already cost more than the
    /// destination.
    pub pruned: u64,
    /// Expanded vertices reopened by a later relaxation.
    pub reopened: u64,
    /// Frontier insertions, the source included.
    pub enqueued: u64,
    /// Whether the run stopped at the expansion bound.
    pub truncated: bool,
}

/// Owned result of [`PathFinder::route`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Least cumulative weight from source to destination.
    pub weight: Weight,
    /// Per-vertex records from source to destination inclusive.
    pub hops: Vec<VertexStatus>,
}

impl Route {
    /// Vertex ids along the route.
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.hops.iter().map(|hop| hop.id).collect()
    }
}

/// Least-cost path search over a [`Graph`].
///
/// The frontier is a FIFO queue rather than a weight-ordered heap. A vertex
/// may therefore be expanded before its final weight is known; later
/// relaxations keep lowering weights until the frontier drains. Each call to
/// [`PathFinder::shortest_path`] rebuilds every per-vertex record, so the
/// context can be reused across runs and across edge updates made through
/// [`PathFinder::graph_mut`].
pub struct PathFinder<P = (), U = ()> {
    graph: Graph<P, U>,
    options: RouteOptions,
    weight_fn: Option<WeightFn<U>>,
    amount_fn: Option<AmountFn<U>>,
    statuses: Vec<VertexStatus>,
    last_run: RunStats,
}

impl<P, U> PathFinder<P, U> {
    /// Creates a search context with default options.
    pub fn new(graph: Graph<P, U>) -> Self {
        Self {
            graph,
            options: RouteOptions::default(),
            weight_fn: None,
            amount_fn: None,
            statuses: Vec::new(),
            last_run: RunStats::default(),
        }
    }

    /// Creates a search context with validated `options`.
    pub fn with_options(graph: Graph<P, U>, options: RouteOptions) -> Result<Self> {
        options.validate()?;
        let mut finder = Self::new(graph);
        finder.options = options;
        Ok(finder)
    }

    /// Active options.
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    /// Sets the amount attached to the source of subsequent runs.
    pub fn set_initial_amount(&mut self, amount: Amount) {
        self.options.initial_amount = amount;
    }

    /// Derives edge weights from the arriving amount and the edge's user
    /// data instead of the stored static weight.
    ///
    /// In [`RelaxationMode::Reopen`] every record derived from a reopened
    /// vertex is recomputed from its new amount, so the returned path is
    /// always consistent. The result is the least cost only when a cheaper
    /// arrival never makes onward edges costlier; otherwise a run may need
    /// [`RouteOptions::max_expansions`] to stay bounded.
    pub fn set_weight_fn<F>(&mut self, weight_fn: F)
    where
        F: Fn(Amount, Option<&U>) -> Weight + 'static,
    {
        self.weight_fn = Some(Box::new(weight_fn));
    }

    /// Transforms the amount carried across each relaxed edge. Without one,
    /// a relaxed vertex inherits its parent's amount.
    pub fn set_amount_fn<F>(&mut self, amount_fn: F)
    where
        F: Fn(Amount, Option<&U>) -> Amount + 'static,
    {
        self.amount_fn = Some(Box::new(amount_fn));
    }

    /// Reverts to stored static weights.
    pub fn clear_weight_fn(&mut self) {
        self.weight_fn = None;
    }

    /// Reverts to unmodified amount propagation.
    pub fn clear_amount_fn(&mut self) {
        self.amount_fn = None;
    }

    /// Graph being searched.
    pub fn graph(&self) -> &Graph<P, U> {
        &self.graph
    }

    /// Mutable graph, for edge updates between runs.
    pub fn graph_mut(&mut self) -> &mut Graph<P, U> {
        &mut self.graph
    }

    /// Releases the graph.
    pub fn into_graph(self) -> Graph<P, U> {
        self.graph
    }

    /// Record of `vertex` from the most recent run.
    pub fn status(&self, vertex: VertexId) -> Option<&VertexStatus> {
        self.statuses.get(vertex.index())
    }

    /// All records from the most recent run, indexed by vertex id. Empty
    /// before the first run.
    pub fn statuses(&self) -> &[VertexStatus] {
        &self.statuses
    }

    /// Counters from the most recent run.
    pub fn last_run(&self) -> RunStats {
        self.last_run
    }

    /// Computes the least-cost path from `src` to `dst`.
    ///
    /// On success `path` holds the records of every vertex from `src` to
    /// `dst` inclusive and the least cumulative weight is returned. When
    /// `dst` is unreachable, or the expansion bound cut the run short,
    /// `path` is emptied and `None` is returned.
    ///
    /// # Panics
    /// If either vertex is out of range, or if the parent chain of the
    /// result is inconsistent.
    pub fn shortest_path(
        &mut self,
        src: VertexId,
        dst: VertexId,
        path: &mut DynamicArray<VertexStatus>,
    ) -> Option<Weight> {
        let vertex_count = self.graph.vertex_count();
        assert!(
            src.index() < vertex_count,
            "source {src} out of range (vertex count {vertex_count})"
        );
        assert!(
            dst.index() < vertex_count,
            "destination {dst} out of range (vertex count {vertex_count})"
        );
        debug!(
            %src,
            %dst,
            vertices = vertex_count,
            relaxation = ?self.options.relaxation,
            "route.search.start"
        );

        self.statuses.clear();
        self.statuses
            .extend((0..vertex_count).map(|index| VertexStatus::unreached(VertexId(index as u32))));
        self.last_run = RunStats::default();

        let source = &mut self.statuses[src.index()];
        source.min_weight = 0;
        source.amount = self.options.initial_amount;
        source.depth = Some(0);

        if src == dst {
            source.visited = true;
            write_path(&self.statuses, src, dst, path);
            debug!(%src, %dst, weight = 0, hops = 1, "route.search.done");
            return Some(0);
        }

        self.relax_all(src, dst);

        let target = self.statuses[dst.index()];
        let stats = self.last_run;
        let result = if target.is_reached() && !stats.truncated {
            write_path(&self.statuses, src, dst, path);
            Some(target.min_weight)
        } else {
            path.set_length(0);
            None
        };
        debug!(
            %src,
            %dst,
            weight = ?result,
            hops = path.len(),
            expansions = stats.expansions,
            pruned = stats.pruned,
            reopened = stats.reopened,
            "route.search.done"
        );
        result
    }

    /// [`PathFinder::shortest_path`] into a fresh buffer, returned as an
    /// owned [`Route`].
    pub fn route(&mut self, src: VertexId, dst: VertexId) -> Option<Route> {
        let mut path = DynamicArray::new();
        let weight = self.shortest_path(src, dst, &mut path)?;
        Some(Route {
            weight,
            hops: path.iter().copied().collect(),
        })
    }

    fn relax_all(&mut self, src: VertexId, dst: VertexId) {
        let Self {
            graph,
            options,
            weight_fn,
            amount_fn,
            statuses,
            last_run: stats,
        } = self;
        let reopen = options.relaxation == RelaxationMode::Reopen;

        let mut frontier = Queue::new();
        statuses[src.index()].queued = true;
        frontier.enqueue(src);
        stats.enqueued += 1;

        while let Some(vertex) = frontier.dequeue() {
            if reopen {
                statuses[vertex.index()].queued = false;
            }
            let current = statuses[vertex.index()];
            trace!(%vertex, min_weight = current.min_weight, "route.search.dequeue");

            let best = statuses[dst.index()];
            let pruned = options.prune_past_destination
                && best.is_reached()
                && current.min_weight > best.min_weight;
            if pruned {
                stats.pruned += 1;
                trace!(
                    %vertex,
                    min_weight = current.min_weight,
                    bound = best.min_weight,
                    "route.search.prune"
                );
                // Reopened children must still follow this vertex's new record.
                if !reopen {
                    continue;
                }
            } else {
                if let Some(limit) = options.max_expansions {
                    if stats.expansions >= limit {
                        stats.truncated = true;
                        warn!(%src, %dst, limit, "route.search.truncated");
                        return;
                    }
                }
                stats.expansions += 1;
            }

            for edge in graph.edges().out_edges(vertex) {
                let existing = statuses[edge.dst.index()];
                if existing.visited && !reopen {
                    continue;
                }
                let derived = reopen && existing.parent == Some(vertex);
                if pruned && !derived {
                    continue;
                }

                let weight = match weight_fn {
                    Some(weight_fn) => weight_fn(current.amount, edge.user_data),
                    None => edge.weight,
                };
                let candidate = current.min_weight.saturating_add(weight);
                let amount = match amount_fn {
                    Some(amount_fn) => amount_fn(current.amount, edge.user_data),
                    None => current.amount,
                };
                let depth = current.depth.map(|depth| depth + 1);

                if derived {
                    if existing.min_weight == candidate
                        && existing.amount == amount
                        && existing.depth == depth
                    {
                        continue;
                    }
                    trace!(
                        from = %vertex,
                        to = %edge.dst,
                        weight = candidate,
                        "route.search.refresh"
                    );
                } else {
                    if candidate >= existing.min_weight {
                        continue;
                    }
                    // A vertex never becomes the parent of its own ancestor.
                    if reopen
                        && existing.is_reached()
                        && descends_from(statuses, vertex, edge.dst)
                    {
                        continue;
                    }
                    trace!(
                        from = %vertex,
                        to = %edge.dst,
                        weight = candidate,
                        "route.search.relax"
                    );
                }

                let next = &mut statuses[edge.dst.index()];
                next.min_weight = candidate;
                next.parent = Some(vertex);
                next.depth = depth;
                next.amount = amount;

                if next.visited {
                    next.visited = false;
                    stats.reopened += 1;
                    trace!(vertex = %edge.dst, "route.search.reopen");
                }
                if !next.queued {
                    next.queued = true;
                    frontier.enqueue(edge.dst);
                    stats.enqueued += 1;
                    trace!(vertex = %edge.dst, "route.search.enqueue");
                }
            }
            if !pruned {
                statuses[vertex.index()].visited = true;
            }
        }
    }
}

/// Whether `ancestor` lies on the parent chain of `vertex`, `vertex`
/// included.
fn descends_from(statuses: &[VertexStatus], vertex: VertexId, ancestor: VertexId) -> bool {
    let mut cursor = Some(vertex);
    while let Some(id) = cursor {
        if id == ancestor {
            return true;
        }
        cursor = statuses[id.index()].parent;
    }
    false
}

/// Walks parent links back from `dst`, placing each record at the index
/// given by its depth.
fn write_path(
    statuses: &[VertexStatus],
    src: VertexId,
    dst: VertexId,
    path: &mut DynamicArray<VertexStatus>,
) {
    let last = statuses[dst.index()];
    let Some(depth) = last.depth else {
        panic!("destination {dst} reached without a depth");
    };
    path.clear();
    path.set_length(depth as usize + 1);

    let mut current = last;
    let mut depth = depth;
    loop {
        path.set(depth as usize, current);
        let Some(parent) = current.parent else {
            break;
        };
        let up = statuses[parent.index()];
        assert_eq!(
            up.depth.map(|d| d + 1),
            Some(depth),
            "parent chain of {dst} broken between {} and {parent}",
            current.id
        );
        current = up;
        depth -= 1;
    }
    assert!(
        depth == 0 && current.id == src,
        "parent chain of {dst} ends at {} instead of {src}",
        current.id
    );
}

impl<P, U> fmt::Debug for PathFinder<P, U>
where
    P: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFinder")
            .field("graph", &self.graph)
            .field("options", &self.options)
            .field("weight_fn", &self.weight_fn.is_some())
            .field("amount_fn", &self.amount_fn.is_some())
            .field("last_run", &self.last_run)
            .finish()
    }
}
