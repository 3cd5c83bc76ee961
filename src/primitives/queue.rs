#![forbid(unsafe_code)]

use super::list::{Iter, LinkMode, SList};

/// FIFO queue over a forward-only [`SList`]: enqueue at the tail, dequeue at
/// the head.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    list: SList<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        let list = SList::new();
        debug_assert_eq!(list.mode(), LinkMode::Forward);
        Self { list }
    }

    /// Appends `item` at the back.
    pub fn enqueue(&mut self, item: T) {
        self.list.push_back(item);
    }

    /// Removes the front item.
    pub fn dequeue(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Front item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.list.front()
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Items from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Drops every queued item.
    pub fn clear(&mut self) {
        self.list.clear();
    }
}
