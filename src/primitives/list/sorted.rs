use std::cmp::Ordering;
use std::fmt;

use super::{Cursor, Iter, SList};

/// Ordering function used by a [`SortedList`].
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Bidirectional list kept in comparator order.
///
/// Insertion and lookup are linear scans, which is the right trade for the
/// short per-vertex fan-out lists this backs.
#[derive(Clone)]
pub struct SortedList<T> {
    list: SList<T>,
    compare: Comparator<T>,
}

impl<T: fmt::Debug> fmt::Debug for SortedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.list.iter()).finish()
    }
}

impl<T: Ord> Default for SortedList<T> {
    fn default() -> Self {
        Self::new(T::cmp)
    }
}

impl<T> SortedList<T> {
    /// Creates an empty list ordered by `compare`.
    pub fn new(compare: Comparator<T>) -> Self {
        Self {
            list: SList::bidirectional(),
            compare,
        }
    }

    /// Inserts `item` before the first entry that compares strictly greater.
    /// Entries equal to `item` stay in front of it, so equal keys keep their
    /// insertion order.
    pub fn add(&mut self, item: T) -> Cursor {
        let mut cursor = self.list.begin();
        while let Some(existing) = self.list.get(&cursor) {
            if (self.compare)(&item, existing) == Ordering::Less {
                return self.list.insert_before(&cursor, item);
            }
            self.list.advance(&mut cursor);
        }
        self.list.insert_before(&Cursor::default(), item)
    }

    /// Unlinks and returns the entry under `cursor`.
    ///
    /// # Panics
    /// If `cursor` is stale.
    pub fn remove(&mut self, cursor: &Cursor) -> Option<T> {
        self.list.remove(cursor)
    }

    /// First entry `compare` reports equal to `probe`. `compare` may order
    /// by a different key than the list itself.
    pub fn find<F>(&self, probe: &T, compare: F) -> Option<Cursor>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.position(|item| compare(probe, item) == Ordering::Equal)
    }

    /// First entry matching `predicate`.
    pub fn position<F>(&self, predicate: F) -> Option<Cursor>
    where
        F: Fn(&T) -> bool,
    {
        let mut cursor = self.list.begin();
        while let Some(item) = self.list.get(&cursor) {
            if predicate(item) {
                return Some(cursor);
            }
            self.list.advance(&mut cursor);
        }
        None
    }

    /// Entry under `cursor`.
    pub fn get(&self, cursor: &Cursor) -> Option<&T> {
        self.list.get(cursor)
    }

    /// Cursor on the smallest entry.
    pub fn begin(&self) -> Cursor {
        self.list.begin()
    }

    /// Moves `cursor` to the next larger entry.
    pub fn advance(&self, cursor: &mut Cursor) -> bool {
        self.list.advance(cursor)
    }

    /// Moves `cursor` to the next smaller entry.
    pub fn retreat(&self, cursor: &mut Cursor) -> bool {
        self.list.retreat(cursor)
    }

    /// Smallest entry.
    pub fn first(&self) -> Option<&T> {
        self.list.front()
    }

    /// Largest entry.
    pub fn last(&self) -> Option<&T> {
        self.list.back()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Entries in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.list.clear();
    }
}

impl<'a, T> IntoIterator for &'a SortedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Entry {
        key: u32,
        tag: char,
    }

    fn by_key(a: &Entry, b: &Entry) -> Ordering {
        a.key.cmp(&b.key)
    }

    fn by_tag(a: &Entry, b: &Entry) -> Ordering {
        a.tag.cmp(&b.tag)
    }

    fn entry(key: u32, tag: char) -> Entry {
        Entry { key, tag }
    }

    #[test]
    fn add_keeps_order_and_insertion_order_among_equals() {
        let mut list = SortedList::new(by_key);
        list.add(entry(5, 'a'));
        list.add(entry(1, 'b'));
        list.add(entry(5, 'c'));
        list.add(entry(3, 'd'));
        list.add(entry(1, 'e'));
        list.add(entry(9, 'f'));

        let tags: String = list.iter().map(|e| e.tag).collect();
        assert_eq!(tags, "bedacf");
        assert_eq!(list.first().map(|e| e.key), Some(1));
        assert_eq!(list.last().map(|e| e.key), Some(9));
    }

    #[test]
    fn find_by_secondary_key_and_remove() {
        let mut list = SortedList::new(by_key);
        for (key, tag) in [(4, 'x'), (2, 'y'), (7, 'z')] {
            list.add(entry(key, tag));
        }

        let cursor = list
            .find(&entry(0, 'x'), by_tag)
            .expect("x is present");
        assert_eq!(list.get(&cursor), Some(&entry(4, 'x')));
        assert_eq!(list.remove(&cursor), Some(entry(4, 'x')));

        assert!(list.find(&entry(0, 'x'), by_tag).is_none());
        assert!(list.find(&entry(3, '?'), by_key).is_none());
        assert_eq!(list.iter().map(|e| e.key).collect::<Vec<_>>(), vec![2, 7]);
    }

    #[test]
    fn remove_every_position() {
        let mut list: SortedList<u32> = SortedList::default();
        for value in [3, 1, 4, 1, 5, 9, 2, 6] {
            list.add(value);
        }

        let head = list.begin();
        assert_eq!(list.remove(&head), Some(1));

        let tail = list.position(|v| *v == 9).unwrap();
        assert_eq!(list.remove(&tail), Some(9));

        let middle = list.position(|v| *v == 4).unwrap();
        assert_eq!(list.remove(&middle), Some(4));

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 5, 6]);

        let mut cursor = list.begin();
        while list.advance(&mut cursor) {}
        assert!(list.retreat(&mut cursor));
        assert_eq!(list.get(&cursor), Some(&6));
    }

    #[test]
    fn empty_list_misses() {
        let list: SortedList<u32> = SortedList::default();
        assert!(list.find(&1, u32::cmp).is_none());
        assert!(!list.begin().is_valid());
        assert!(list.is_empty());
    }
}
