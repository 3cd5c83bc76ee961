#![forbid(unsafe_code)]

//! Container primitives the edge index and the search engine are built on.
//!
//! Includes a growable slot array, an ordered linked list with an optional
//! backward link, a comparator-ordered list on top of it, and a FIFO queue.

/// Growable array of optional slots with block-rounded capacity.
pub mod array;

/// Ordered linked list and the comparator-ordered list built on it.
///
/// Arena-backed nodes with cursor-based traversal and splicing.
pub mod list;

/// FIFO queue over the forward-only list.
pub mod queue;

pub use array::DynamicArray;
pub use list::{Comparator, Cursor, LinkMode, SList, SortedList};
pub use queue::Queue;
