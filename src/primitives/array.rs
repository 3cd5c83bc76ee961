#![forbid(unsafe_code)]

/// Slot count every allocation is rounded up to.
pub const ALLOC_GRANULARITY: usize = 64;

/// Growable sequence of optional slots.
///
/// Storage only ever grows through [`DynamicArray::resize`]; the logical
/// length is tracked separately so callers can size the array up front and
/// fill positions out of order. Slots inside the length that were never
/// written read back as `None`.
#[derive(Debug, Clone)]
pub struct DynamicArray<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicArray<T> {
    /// Creates an array without backing storage.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Creates an array with storage for at least `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut array = Self::new();
        array.resize(capacity);
        array
    }

    /// Grows storage to at least `min_slots`, rounded up to
    /// [`ALLOC_GRANULARITY`]. Never shrinks and never changes the length.
    pub fn resize(&mut self, min_slots: usize) {
        let target = round_up(min_slots);
        if target <= self.slots.len() {
            return;
        }
        self.slots.resize_with(target, || None);
    }

    /// Sets the logical length. Slots past a shrinking length are dropped,
    /// slots exposed by a growing length read back as `None`.
    pub fn set_length(&mut self, len: usize) {
        self.resize(len);
        if len < self.len {
            for slot in &mut self.slots[len..self.len] {
                *slot = None;
            }
        }
        self.len = len;
    }

    /// Runs `destroy` over every present entry inside the length and empties
    /// the slots. Storage and length are kept.
    pub fn clear_with<F: FnMut(T)>(&mut self, mut destroy: F) {
        for slot in &mut self.slots[..self.len] {
            if let Some(item) = slot.take() {
                destroy(item);
            }
        }
    }

    /// Drops every entry inside the length. Storage and length are kept.
    pub fn clear(&mut self) {
        self.clear_with(drop);
    }

    /// Drops every entry, then releases the storage.
    pub fn cleanup(&mut self) {
        self.cleanup_with(drop);
    }

    /// Runs `destroy` over every present entry inside the length, then
    /// releases the storage.
    pub fn cleanup_with<F: FnMut(T)>(&mut self, destroy: F) {
        self.clear_with(destroy);
        self.slots = Vec::new();
        self.len = 0;
    }

    /// Logical length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Appends `item` after the current length.
    pub fn push(&mut self, item: T) {
        let index = self.len;
        self.set_length(index + 1);
        self.slots[index] = Some(item);
    }

    /// Entry at `index`, if inside the length and present.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots[index].as_ref()
    }

    /// Mutable entry at `index`, if inside the length and present.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        self.slots[index].as_mut()
    }

    /// Stores `item` at `index`, returning the previous entry.
    ///
    /// # Panics
    /// If `index` is outside the logical length.
    pub fn set(&mut self, index: usize, item: T) -> Option<T> {
        assert!(
            index < self.len,
            "array index {index} out of bounds (length {})",
            self.len
        );
        self.slots[index].replace(item)
    }

    /// Removes and returns the entry at `index`, leaving the slot empty.
    pub fn take(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        self.slots[index].take()
    }

    /// Returns the entry at `index`, creating it with `init` when the slot is
    /// empty. The length grows to cover `index`.
    pub fn get_or_insert_with<F: FnOnce() -> T>(&mut self, index: usize, init: F) -> &mut T {
        if index >= self.len {
            self.set_length(index + 1);
        }
        self.slots[index].get_or_insert_with(init)
    }

    /// Present entries inside the length, in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    /// Every slot inside the length, present or not.
    pub fn slots(&self) -> &[Option<T>] {
        &self.slots[..self.len]
    }
}

fn round_up(slots: usize) -> usize {
    if slots == 0 {
        return ALLOC_GRANULARITY;
    }
    slots.div_ceil(ALLOC_GRANULARITY) * ALLOC_GRANULARITY
}
