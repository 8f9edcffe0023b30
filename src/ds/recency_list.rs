//! Recency chain backed by a slot arena.
//!
//! Stores chain nodes in a `Vec`-backed arena and links them by [`EntryId`],
//! giving stable handles and O(1) unlink/relink without raw pointers. The
//! hash index above this layer stores `EntryId`s, never references, so the
//! index and the chain can be mutated in lock-step without lifetime hazards.
//!
//! ## Architecture
//!
//! ```text
//!   slots (Vec<Option<Node<T>>>)
//!   ┌─────────┬──────────────────────────────────────────────┐
//!   │ EntryId │ Node { value, prev, next }                   │
//!   ├─────────┼──────────────────────────────────────────────┤
//!   │ id_0    │ { value: A, prev: None, next: Some(id_1) }   │
//!   │ id_1    │ { value: B, prev: Some(id_0), next: id_2 }   │
//!   │ id_2    │ { value: C, prev: Some(id_1), next: None }   │
//!   └─────────┴──────────────────────────────────────────────┘
//!
//!   front ─► [id_0] ◄──► [id_1] ◄──► [id_2] ◄── back
//!   (LRU)                                       (MRU)
//! ```
//!
//! Chain order runs from least-recently-used at the front to
//! most-recently-used at the back. The front node's `prev` and the back
//! node's `next` are both `None`: a defined boundary, not a dangling link.
//!
//! ## Operations
//! - `push_back(value)`: append at the MRU end, O(1)
//! - `pop_front()`: remove the LRU end, O(1)
//! - `promote(id)`: unlink + relink at the MRU end, O(1); no-op when `id`
//!   is already the back
//! - `remove(id)`: unlink + free the slot, O(1)
//!
//! Freed slots are recycled through a free list, so long-lived caches do not
//! grow the arena past their high-water mark.
//!
//! [`check_invariants`](RecencyList::check_invariants) walks the chain in
//! both directions and cross-checks the arena bookkeeping.

use crate::error::InvariantError;

/// Stable handle to a live chain entry.
///
/// An `EntryId` stays valid until the entry it names is removed; the arena
/// may later reuse the underlying slot for a different entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    /// Returns the raw slot index behind this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<EntryId>,
    next: Option<EntryId>,
}

/// Doubly linked recency chain whose nodes live in a slot arena.
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<EntryId>,
    tail: Option<EntryId>,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty chain with reserved slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the chain has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` names a live entry.
    pub fn contains(&self, id: EntryId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Returns the value at the front (least-recently-used end).
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the `EntryId` at the front (least-recently-used end).
    pub fn front_id(&self) -> Option<EntryId> {
        self.head
    }

    /// Returns the value at the back (most-recently-used end).
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the `EntryId` at the back (most-recently-used end).
    pub fn back_id(&self) -> Option<EntryId> {
        self.tail
    }

    /// Returns the value for a live entry, if present.
    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.slots
            .get(id.0)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.value)
    }

    /// Returns a mutable reference to a live entry's value, if present.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut())
            .map(|node| &mut node.value)
    }

    /// Appends a new entry at the back (most-recently-used end) and returns
    /// its handle.
    pub fn push_back(&mut self, value: T) -> EntryId {
        let node = Node {
            value,
            prev: self.tail,
            next: None,
        };
        let id = self.alloc(node);
        if let Some(tail) = self.tail {
            if let Some(tail_node) = self.node_mut(tail) {
                tail_node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        id
    }

    /// Removes and returns the front (least-recently-used) value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Removes the entry `id` from the chain and returns its value.
    pub fn remove(&mut self, id: EntryId) -> Option<T> {
        self.detach(id)?;
        self.free_slot(id)
    }

    /// Moves an existing entry to the back (most-recently-used end).
    ///
    /// Returns `false` if `id` does not name a live entry. Promoting the
    /// entry already at the back is a true no-op.
    pub fn promote(&mut self, id: EntryId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if Some(id) == self.tail {
            return true;
        }
        self.detach(id);
        self.attach_back(id);
        true
    }

    /// Removes all entries and frees every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns an iterator over values from front (LRU) to back (MRU).
    pub fn iter(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.head,
        }
    }

    /// Returns an iterator over `EntryId`s from front (LRU) to back (MRU).
    pub fn iter_ids(&self) -> RecencyIdIter<'_, T> {
        RecencyIdIter {
            list: self,
            current: self.head,
        }
    }

    /// Verifies chain and arena bookkeeping.
    ///
    /// Walks the chain forward and backward, checking that both traversals
    /// visit every live entry exactly once, that neighbor links are mutually
    /// consistent, and that the live slot count matches `len`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        if live != self.len {
            return Err(InvariantError::new(format!(
                "live slot count {} does not match len {}",
                live, self.len
            )));
        }
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || self.len != 0 {
                return Err(InvariantError::new(
                    "empty-chain markers out of sync with len",
                ));
            }
            return Ok(());
        }

        // Forward walk: front to back.
        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .node(id)
                .ok_or_else(|| InvariantError::new(format!("dead slot {} in chain", id.0)))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "backward link of slot {} disagrees with forward order",
                    id.0
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("cycle detected in chain"));
            }
            prev = Some(id);
            current = node.next;
        }
        if prev != self.tail {
            return Err(InvariantError::new("forward walk did not end at the back"));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "forward walk visited {} entries, len is {}",
                count, self.len
            )));
        }

        // Backward walk: back to front.
        let mut count = 0usize;
        let mut current = self.tail;
        while let Some(id) = current {
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("cycle detected in reverse chain"));
            }
            current = self.node(id).and_then(|node| node.prev);
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "backward walk visited {} entries, len is {}",
                count, self.len
            )));
        }

        Ok(())
    }

    fn node(&self, id: EntryId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: EntryId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    fn alloc(&mut self, node: Node<T>) -> EntryId {
        let idx = if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        };
        self.len += 1;
        EntryId(idx)
    }

    fn free_slot(&mut self, id: EntryId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let node = slot.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Unlinks `id` from its neighbors without freeing its slot. Handles all
    /// three structural positions (front, interior, back) with at most two
    /// neighbor relinks.
    fn detach(&mut self, id: EntryId) -> Option<()> {
        let (prev, next) = {
            let node = self.node(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.node_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_back(&mut self, id: EntryId) -> Option<()> {
        let old_tail = self.tail;
        {
            let node = self.node_mut(id)?;
            node.next = None;
            node.prev = old_tail;
        }
        if let Some(old_tail) = old_tail {
            if let Some(tail_node) = self.node_mut(old_tail) {
                tail_node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        Some(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values from front (LRU) to back (MRU).
pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<EntryId>,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Iterator over `EntryId`s from front (LRU) to back (MRU).
pub struct RecencyIdIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<EntryId>,
}

impl<'a, T> Iterator for RecencyIdIter<'a, T> {
    type Item = EntryId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        Some(id)
    }
}
