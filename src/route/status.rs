use std::fmt;

use serde::Serialize;

use crate::types::{Amount, VertexId, Weight, AMOUNT_UNSET, WEIGHT_UNSET};

/// Where a vertex stands in the relaxation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitState {
    /// Not reached yet.
    Unvisited,
    /// Waiting in the frontier.
    Queued,
    /// Outgoing edges expanded.
    Visited,
}

/// Per-run search record of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VertexStatus {
    /// Vertex this record describes.
    pub id: VertexId,
    /// Least cumulative weight found so far; [`WEIGHT_UNSET`] until reached.
    pub min_weight: Weight,
    /// Amount arriving at this vertex along the current best path.
    pub amount: Amount,
    /// Set once the vertex's outgoing edges have been expanded.
    pub visited: bool,
    /// Set while the vertex sits in the frontier.
    pub queued: bool,
    /// Hop count from the source; `None` until reached.
    pub depth: Option<u32>,
    /// Predecessor on the current best path.
    pub parent: Option<VertexId>,
}

impl VertexStatus {
    /// Record of a vertex no relaxation has touched.
    pub fn unreached(id: VertexId) -> Self {
        Self {
            id,
            min_weight: WEIGHT_UNSET,
            amount: AMOUNT_UNSET,
            visited: false,
            queued: false,
            depth: None,
            parent: None,
        }
    }

    /// Whether any relaxation has reached this vertex.
    pub fn is_reached(&self) -> bool {
        self.min_weight != WEIGHT_UNSET
    }

    /// Current state. A vertex reopened by a better relaxation reports
    /// `Queued` again.
    pub fn state(&self) -> VisitState {
        if self.visited {
            VisitState::Visited
        } else if self.queued {
            VisitState::Queued
        } else {
            VisitState::Unvisited
        }
    }

    /// Parent id, or -1 when there is none.
    pub fn parent_id(&self) -> i64 {
        self.parent.map_or(-1, |parent| i64::from(parent.0))
    }
}

impl fmt::Display for VertexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vertex.id={}, min_weight={}, amount={}, visited={}, queued={}, depth=",
            self.id, self.min_weight, self.amount, self.visited, self.queued
        )?;
        match self.depth {
            Some(depth) => write!(f, "{depth}")?,
            None => f.write_str("-")?,
        }
        write!(f, ", parent_id={}", self.parent_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreached_record() {
        let status = VertexStatus::unreached(VertexId(3));
        assert!(!status.is_reached());
        assert_eq!(status.state(), VisitState::Unvisited);
        assert_eq!(status.parent_id(), -1);
        assert_eq!(status.amount, AMOUNT_UNSET);
    }

    #[test]
    fn dump_line() {
        let status = VertexStatus {
            id: VertexId(4),
            min_weight: 21,
            amount: 0,
            visited: true,
            queued: true,
            depth: Some(4),
            parent: Some(VertexId(5)),
        };
        assert_eq!(status.state(), VisitState::Visited);
        assert_eq!(
            status.to_string(),
            "vertex.id=4, min_weight=21, amount=0, visited=true, queued=true, depth=4, parent_id=5"
        );
        let fresh = VertexStatus::unreached(VertexId(0)).to_string();
        assert!(fresh.ends_with("depth=-, parent_id=-1"));
    }
}
