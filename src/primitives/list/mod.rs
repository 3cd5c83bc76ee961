#![forbid(unsafe_code)]

//! Ordered singly-linked container with an optional backward link.
//!
//! Nodes live in a slot arena owned by the list; links are slot indices, so
//! a node has exactly one owner and neighbours are plain non-owning
//! references. In [`LinkMode::Forward`] only successor links are kept (a
//! plain forward list). [`LinkMode::Bidirectional`] also maintains
//! predecessor links, which lets a [`Cursor`] move backwards and lets
//! removal recover the true neighbours of a node from the node itself.

mod sorted;

pub use sorted::{Comparator, SortedList};

/// How a list links its nodes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LinkMode {
    /// Successor links only.
    Forward,
    /// Successor and predecessor links.
    Bidirectional,
}

/// Position inside a list as the triplet `{prev, current, next}`.
///
/// A cursor is a snapshot: any mutation of the list other than through the
/// cursor itself may invalidate it, and it must be re-derived from
/// [`SList::begin`] afterwards.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    prev: Option<usize>,
    current: Option<usize>,
    next: Option<usize>,
}

impl Cursor {
    /// Whether the cursor points at an entry.
    pub fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the cursor points at the first entry.
    pub fn is_head(&self) -> bool {
        self.current.is_some() && self.prev.is_none()
    }

    /// Whether the cursor points at the last entry.
    pub fn is_tail(&self) -> bool {
        self.current.is_some() && self.next.is_none()
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    item: Option<T>,
    next: Option<usize>,
    prev: Option<usize>,
}

/// Ordered list of owned entries. See the module docs.
#[derive(Debug, Clone)]
pub struct SList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    mode: LinkMode,
}

impl<T> Default for SList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SList<T> {
    /// Creates an empty forward-only list.
    pub fn new() -> Self {
        Self::with_mode(LinkMode::Forward)
    }

    /// Creates an empty list that keeps predecessor links.
    pub fn bidirectional() -> Self {
        Self::with_mode(LinkMode::Bidirectional)
    }

    fn with_mode(mode: LinkMode) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            mode,
        }
    }

    /// Current link mode.
    pub fn mode(&self) -> LinkMode {
        self.mode
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First entry.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|slot| self.nodes[slot].item.as_ref())
    }

    /// Last entry.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|slot| self.nodes[slot].item.as_ref())
    }

    /// Appends `item` after the tail.
    pub fn push_back(&mut self, item: T) {
        let prev = self.tail;
        let slot = self.alloc(item, prev, None);
        match prev {
            Some(tail) => self.nodes[tail].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    /// Prepends `item` before the head.
    pub fn push_front(&mut self, item: T) {
        let next = self.head;
        let slot = self.alloc(item, None, next);
        match next {
            Some(head) => {
                if self.mode == LinkMode::Bidirectional {
                    self.nodes[head].prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    /// Removes and returns the head entry.
    pub fn pop_front(&mut self) -> Option<T> {
        let cursor = self.begin();
        self.remove(&cursor)
    }

    /// Cursor on the head entry, or an invalid cursor for an empty list.
    pub fn begin(&self) -> Cursor {
        match self.head {
            Some(head) => Cursor {
                prev: None,
                current: Some(head),
                next: self.nodes[head].next,
            },
            None => Cursor::default(),
        }
    }

    /// Cursor on the tail entry.
    ///
    /// # Panics
    /// If the list is not bidirectional.
    pub fn last(&self) -> Cursor {
        self.require_bidirectional("last");
        match self.tail {
            Some(tail) => Cursor {
                prev: self.nodes[tail].prev,
                current: Some(tail),
                next: None,
            },
            None => Cursor::default(),
        }
    }

    /// Moves `cursor` one entry forward. An invalid cursor restarts at the
    /// head. Returns whether the cursor points at an entry afterwards.
    pub fn advance(&self, cursor: &mut Cursor) -> bool {
        if cursor.current.is_none() {
            *cursor = self.begin();
            return cursor.is_valid();
        }
        cursor.prev = cursor.current;
        cursor.current = cursor.next;
        cursor.next = cursor.current.and_then(|slot| self.nodes[slot].next);
        cursor.is_valid()
    }

    /// Moves `cursor` one entry backward.
    ///
    /// # Panics
    /// If the list is not bidirectional.
    pub fn retreat(&self, cursor: &mut Cursor) -> bool {
        self.require_bidirectional("retreat");
        if cursor.current.is_none() {
            *cursor = self.last();
            return cursor.is_valid();
        }
        cursor.next = cursor.current;
        cursor.current = cursor.prev;
        cursor.prev = cursor.current.and_then(|slot| self.nodes[slot].prev);
        cursor.is_valid()
    }

    /// Entry under `cursor`.
    pub fn get(&self, cursor: &Cursor) -> Option<&T> {
        cursor
            .current
            .and_then(|slot| self.nodes.get(slot))
            .and_then(|node| node.item.as_ref())
    }

    /// Mutable entry under `cursor`.
    pub fn get_mut(&mut self, cursor: &Cursor) -> Option<&mut T> {
        cursor
            .current
            .and_then(|slot| self.nodes.get_mut(slot))
            .and_then(|node| node.item.as_mut())
    }

    /// Inserts `item` in front of the entry under `cursor` and returns a
    /// cursor on the new entry. An invalid cursor appends at the tail.
    ///
    /// # Panics
    /// If `cursor` is stale.
    pub fn insert_before(&mut self, cursor: &Cursor, item: T) -> Cursor {
        let Some(current) = cursor.current else {
            let prev = self.tail;
            self.push_back(item);
            return Cursor {
                prev,
                current: self.tail,
                next: None,
            };
        };
        self.check_cursor(cursor);

        let slot = self.alloc(item, cursor.prev, Some(current));
        match cursor.prev {
            Some(prev) => self.nodes[prev].next = Some(slot),
            None => self.head = Some(slot),
        }
        if self.mode == LinkMode::Bidirectional {
            self.nodes[current].prev = Some(slot);
        }
        Cursor {
            prev: cursor.prev,
            current: Some(slot),
            next: Some(current),
        }
    }

    /// Unlinks the entry under `cursor` and returns it. Returns `None` for
    /// an invalid cursor.
    ///
    /// # Panics
    /// If `cursor` is stale.
    pub fn remove(&mut self, cursor: &Cursor) -> Option<T> {
        let current = cursor.current?;
        self.check_cursor(cursor);

        let (prev, next) = match self.mode {
            LinkMode::Bidirectional => (self.nodes[current].prev, self.nodes[current].next),
            LinkMode::Forward => (cursor.prev, self.nodes[current].next),
        };

        match (prev, next) {
            (None, _) => {
                // head: the successor becomes the head, or the list empties
                self.head = next;
                match next {
                    Some(next) => {
                        if self.mode == LinkMode::Bidirectional {
                            self.nodes[next].prev = None;
                        }
                    }
                    None => self.tail = None,
                }
            }
            (Some(prev), None) => {
                self.nodes[prev].next = None;
                self.tail = Some(prev);
            }
            (Some(prev), Some(next)) => {
                self.nodes[prev].next = Some(next);
                if self.mode == LinkMode::Bidirectional {
                    self.nodes[next].prev = Some(prev);
                }
            }
        }

        Some(self.release(current))
    }

    /// Switches a forward list to bidirectional mode by deriving every
    /// predecessor link. No-op for a list that is already bidirectional.
    pub fn convert_to_bidirectional(&mut self) {
        if self.mode == LinkMode::Bidirectional {
            return;
        }
        let mut prev = None;
        let mut current = self.head;
        while let Some(slot) = current {
            self.nodes[slot].prev = prev;
            prev = Some(slot);
            current = self.nodes[slot].next;
        }
        self.mode = LinkMode::Bidirectional;
    }

    /// Reverses the entry order in place.
    pub fn reverse(&mut self) {
        let mut prev = None;
        let mut current = self.head;
        while let Some(slot) = current {
            let next = self.nodes[slot].next;
            self.nodes[slot].next = prev;
            if self.mode == LinkMode::Bidirectional {
                self.nodes[slot].prev = next;
            }
            prev = Some(slot);
            current = next;
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Runs `destroy` over every entry in order and empties the list.
    pub fn clear_with<F: FnMut(T)>(&mut self, mut destroy: F) {
        let mut current = self.head;
        while let Some(slot) = current {
            current = self.nodes[slot].next;
            if let Some(item) = self.nodes[slot].item.take() {
                destroy(item);
            }
        }
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.clear_with(drop);
    }

    /// Entries from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Entries from tail to head.
    ///
    /// # Panics
    /// If the list is not bidirectional.
    pub fn iter_rev(&self) -> RevIter<'_, T> {
        self.require_bidirectional("iter_rev");
        RevIter {
            list: self,
            next: self.tail,
            remaining: self.len,
        }
    }

    fn alloc(&mut self, item: T, prev: Option<usize>, next: Option<usize>) -> usize {
        let prev = match self.mode {
            LinkMode::Bidirectional => prev,
            LinkMode::Forward => None,
        };
        let node = Node {
            item: Some(item),
            next,
            prev,
        };
        self.len += 1;
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> T {
        let node = &mut self.nodes[slot];
        node.next = None;
        node.prev = None;
        let Some(item) = node.item.take() else {
            panic!("list slot {slot} released twice");
        };
        self.free.push(slot);
        self.len -= 1;
        item
    }

    fn check_cursor(&self, cursor: &Cursor) {
        let Some(current) = cursor.current else {
            return;
        };
        let live = self
            .nodes
            .get(current)
            .is_some_and(|node| node.item.is_some());
        assert!(live, "stale list cursor: slot {current} is not live");

        let node = &self.nodes[current];
        let linked_from_prev = match cursor.prev {
            Some(prev) => self.nodes[prev].next == Some(current),
            None => self.head == Some(current),
        };
        assert!(
            linked_from_prev && node.next == cursor.next,
            "stale list cursor: neighbours of slot {current} changed"
        );
        if self.mode == LinkMode::Bidirectional {
            assert_eq!(
                node.prev, cursor.prev,
                "stale list cursor: predecessor of slot {current} changed"
            );
        }
    }

    fn require_bidirectional(&self, op: &str) {
        assert!(
            self.mode == LinkMode::Bidirectional,
            "{op} requires a bidirectional list"
        );
    }
}

/// Forward iterator over an [`SList`].
pub struct Iter<'a, T> {
    list: &'a SList<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        let node = &self.list.nodes[slot];
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.item.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Backward iterator over a bidirectional [`SList`].
pub struct RevIter<'a, T> {
    list: &'a SList<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for RevIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        let node = &self.list.nodes[slot];
        self.next = node.prev;
        self.remaining = self.remaining.saturating_sub(1);
        node.item.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> IntoIterator for &'a SList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &SList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn forward_list_push_and_pop() {
        let mut list = SList::new();
        list.push_back(1);
        list.push_back(2);
        list.push_front(0);
        assert_eq!(collect(&list), vec![0, 1, 2]);
        assert_eq!(list.front(), Some(&0));
        assert_eq!(list.back(), Some(&2));

        assert_eq!(list.pop_front(), Some(0));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
        assert_eq!(list.back(), None);
    }

    #[test]
    fn cursor_walks_with_prev_current_next() {
        let mut list = SList::bidirectional();
        for value in 0..4 {
            list.push_back(value);
        }

        let mut cursor = list.begin();
        assert!(cursor.is_head());
        let mut seen = vec![*list.get(&cursor).unwrap()];
        while list.advance(&mut cursor) {
            seen.push(*list.get(&cursor).unwrap());
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);

        let mut cursor = list.last();
        assert!(cursor.is_tail());
        let mut seen = vec![*list.get(&cursor).unwrap()];
        while list.retreat(&mut cursor) {
            seen.push(*list.get(&cursor).unwrap());
        }
        assert_eq!(seen, vec![3, 2, 1, 0]);
    }

    #[test]
    fn remove_head_tail_and_interior() {
        for mode in [LinkMode::Forward, LinkMode::Bidirectional] {
            let mut list = SList::with_mode(mode);
            for value in 0..5 {
                list.push_back(value);
            }

            // interior
            let mut cursor = list.begin();
            list.advance(&mut cursor);
            list.advance(&mut cursor);
            assert_eq!(list.remove(&cursor), Some(2));
            assert_eq!(collect(&list), vec![0, 1, 3, 4]);

            // head
            let head = list.begin();
            assert_eq!(list.remove(&head), Some(0));
            assert_eq!(collect(&list), vec![1, 3, 4]);

            // tail
            let mut cursor = list.begin();
            while !cursor.is_tail() {
                list.advance(&mut cursor);
            }
            assert_eq!(list.remove(&cursor), Some(4));
            assert_eq!(collect(&list), vec![1, 3]);
            assert_eq!(list.back(), Some(&3));

            list.push_back(9);
            assert_eq!(collect(&list), vec![1, 3, 9]);
            assert_eq!(list.len(), 3);
        }
    }

    #[test]
    fn insert_before_keeps_backward_links() {
        let mut list = SList::bidirectional();
        list.push_back(1);
        list.push_back(3);

        let mut cursor = list.begin();
        list.advance(&mut cursor);
        let inserted = list.insert_before(&cursor, 2);
        assert_eq!(list.get(&inserted), Some(&2));

        let head = list.begin();
        list.insert_before(&head, 0);
        list.insert_before(&Cursor::default(), 4);

        assert_eq!(collect(&list), vec![0, 1, 2, 3, 4]);
        assert_eq!(list.iter_rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn convert_and_reverse() {
        let mut list = SList::new();
        for value in 0..4 {
            list.push_back(value);
        }
        list.reverse();
        assert_eq!(collect(&list), vec![3, 2, 1, 0]);

        list.convert_to_bidirectional();
        assert_eq!(list.mode(), LinkMode::Bidirectional);
        assert_eq!(list.iter_rev().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);

        list.reverse();
        assert_eq!(collect(&list), vec![0, 1, 2, 3]);
        assert_eq!(list.iter_rev().copied().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn clear_with_visits_in_order() {
        let mut list = SList::new();
        list.push_back("a");
        list.push_back("b");
        let mut seen = Vec::new();
        list.clear_with(|item| seen.push(item));
        assert_eq!(seen, vec!["a", "b"]);
        assert!(list.is_empty());
        assert!(!list.begin().is_valid());
    }

    #[test]
    #[should_panic(expected = "stale list cursor")]
    fn stale_cursor_is_rejected() {
        let mut list = SList::bidirectional();
        list.push_back(1);
        list.push_back(2);
        let cursor = list.begin();
        list.push_front(0);
        list.remove(&cursor);
    }

    #[test]
    #[should_panic(expected = "requires a bidirectional list")]
    fn retreat_needs_backward_links() {
        let mut list = SList::new();
        list.push_back(1);
        let mut cursor = list.begin();
        list.retreat(&mut cursor);
    }
}
