//! Fixed-capacity node pool with slot reuse.
//!
//! All cache entries live in one `Vec` reserved to the cache capacity at
//! construction. Slots are handed out from a free-slot stack first, then from
//! a monotonically increasing cursor (the current `Vec` length). Neither path
//! reallocates, so steady-state `allocate`/`release` never touch the heap
//! allocator.
//!
//! ```text
//!   slots:  [ n0 | n1 | -- | n3 | -- ]  cursor = 5, capacity = 8
//!   free:   [ 2, 4 ]                    next allocate() returns 4
//! ```
//!
//! Links between nodes (`prev`/`next`) are stored as [`SlotId`]s, never as
//! references, so bucket lists can be rewired without aliasing.

/// Index of a slot in a [`NodePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One cache entry plus its position in a frequency bucket.
#[derive(Debug)]
pub struct Node<K, V> {
    // Hot fields first: touched on every bump.
    pub(crate) freq: u64,
    pub(crate) prev: Option<SlotId>,
    pub(crate) next: Option<SlotId>,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Node<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn freq(&self) -> u64 {
        self.freq
    }
}

#[derive(Debug)]
pub struct NodePool<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    capacity: usize,
    len: usize,
}

impl<K, V> NodePool<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            capacity,
            len: 0,
        }
    }

    /// Stores a new unlinked node and returns its slot.
    ///
    /// # Panics
    ///
    /// Panics when every slot is live. Callers enforce capacity before
    /// allocating, so reaching this is a bookkeeping bug.
    pub fn allocate(&mut self, key: K, value: V, freq: u64) -> SlotId {
        let node = Node {
            freq,
            prev: None,
            next: None,
            key,
            value,
        };
        let idx = if let Some(idx) = self.free.pop() {
            debug_assert!(self.slots[idx].is_none(), "free slot {idx} is live");
            self.slots[idx] = Some(node);
            idx
        } else {
            assert!(
                self.slots.len() < self.capacity,
                "node pool exhausted: {} live of {} slots",
                self.len,
                self.capacity
            );
            self.slots.push(Some(node));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Returns the slot to the free stack and hands back its node.
    ///
    /// Returns `None` if the slot is already free. Debug builds assert the
    /// slot is in range.
    pub fn release(&mut self, id: SlotId) -> Option<Node<K, V>> {
        debug_assert!(id.0 < self.slots.len(), "slot {} out of range", id.0);
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node)
    }

    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&Node<K, V>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots handed out from fresh storage since the last `clear`.
    pub fn cursor(&self) -> usize {
        self.slots.len()
    }

    /// Drops every node and rewinds the cursor. Reserved storage is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Node<K, V>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|node| (SlotId(idx), node)))
    }
}
