#![forbid(unsafe_code)]

//! Least-cost path search.
//!
//! [`PathFinder`] owns a [`crate::storage::Graph`] and answers repeated
//! source/destination queries over it. Edge costs come from stored weights
//! or from caller-installed weight and amount functions, such as the
//! [`RoutingFee`] model for amount-dependent payment routing.

mod engine;
mod fees;
mod options;
mod status;

pub use engine::{AmountFn, PathFinder, Route, RunStats, WeightFn};
pub use fees::RoutingFee;
pub use options::{RelaxationMode, RouteOptions};
pub use status::{VertexStatus, VisitState};
